use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::finance_dto::CreateTransactionRequest;
use crate::models::transaction::{Transaction, TransactionKind, VehicleRef};
use crate::utils::errors::AppError;

// Row struct: la referencia de vehículo se guarda como texto plano
// ("All" o el nombre) y se convierte al enum al salir de la BD.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    date: NaiveDate,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    description: Option<String>,
    vehicle: String,
    created_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            date: row.date,
            kind: row.kind,
            category: row.category,
            amount: row.amount,
            description: row.description,
            vehicle: VehicleRef::from(row.vehicle),
            created_at: row.created_at,
        }
    }
}

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (id, date, kind, category, amount, description, vehicle, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.date)
        .bind(request.kind)
        .bind(request.category)
        .bind(request.amount)
        .bind(request.description)
        .bind(request.vehicle.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Transaction::from))
    }

    pub async fn find_all(&self) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Transacciones con fecha dentro de `[from, to]`, ambos inclusive
    pub async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE date BETWEEN $1 AND $2 ORDER BY date DESC, created_at DESC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transacción no encontrada".to_string()));
        }

        Ok(())
    }
}
