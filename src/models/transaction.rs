//! Modelo de Transaction
//!
//! Transacciones financieras (ingresos y gastos) de la flota. Una
//! transacción puede pertenecer a un vehículo concreto o al grupo de
//! todos los vehículos activos (valor "All" en el wire y en la BD).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use uuid::Uuid;

/// Valor centinela que marca una transacción repartida entre los
/// vehículos activos.
pub const ALL_VEHICLES: &str = "All";

/// Tipo de transacción - mapea al ENUM transaction_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Destino de una transacción: un vehículo concreto o todos los activos.
///
/// En la BD y en JSON se representa como texto: el nombre del vehículo o
/// el centinela "All". El enum hace exhaustivo el branch de asignación
/// en analytics en lugar de comparar strings por todo el código.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleRef {
    AllActive,
    Specific(String),
}

impl VehicleRef {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleRef::AllActive => ALL_VEHICLES,
            VehicleRef::Specific(name) => name,
        }
    }
}

impl From<String> for VehicleRef {
    fn from(value: String) -> Self {
        if value == ALL_VEHICLES {
            VehicleRef::AllActive
        } else {
            VehicleRef::Specific(value)
        }
    }
}

impl Serialize for VehicleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VehicleRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.trim().is_empty() {
            return Err(de::Error::custom("la referencia de vehículo no puede estar vacía"));
        }
        Ok(VehicleRef::from(value))
    }
}

/// Transaction principal - mapea a la tabla transactions
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub vehicle: VehicleRef,
    pub created_at: DateTime<Utc>,
}
