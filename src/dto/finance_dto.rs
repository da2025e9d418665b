use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::transaction::{Transaction, TransactionKind, VehicleRef};

/// Request para crear una transacción financiera
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub date: NaiveDate,

    pub kind: TransactionKind,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    /// Monto no negativo; la moneda es implícita
    pub amount: Decimal,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    /// Nombre de vehículo o el centinela "All"
    pub vehicle: VehicleRef,
}

/// Response de transacción para la API
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub vehicle: VehicleRef,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            date: transaction.date,
            kind: transaction.kind,
            category: transaction.category,
            amount: transaction.amount,
            description: transaction.description,
            vehicle: transaction.vehicle,
            created_at: transaction.created_at,
        }
    }
}
