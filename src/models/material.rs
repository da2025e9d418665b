//! Modelo de MaterialEntry
//!
//! Movimientos de material a granel (entradas y salidas) transportados
//! por la flota. No participa en analytics; solo CRUD.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Dirección del movimiento - mapea al ENUM material_direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "material_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaterialDirection {
    In,
    Out,
}

/// MaterialEntry principal - mapea a la tabla material_entries
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaterialEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub direction: MaterialDirection,
    pub material: String,
    pub quantity: Decimal,
    pub unit: String,
    pub price: Option<Decimal>,
    pub location: Option<String>,
    pub driver: Option<String>,
    pub vehicle_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
