use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::material::{MaterialDirection, MaterialEntry};

/// Request para registrar un movimiento de material
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaterialRequest {
    pub date: NaiveDate,

    pub direction: MaterialDirection,

    #[validate(length(min = 1, max = 100))]
    pub material: String,

    pub quantity: Decimal,

    #[validate(length(min = 1, max = 20))]
    pub unit: String,

    pub price: Option<Decimal>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub driver: Option<String>,

    #[validate(length(max = 100))]
    pub vehicle_name: Option<String>,
}

/// Request para actualizar un movimiento de material
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaterialRequest {
    pub date: Option<NaiveDate>,

    pub direction: Option<MaterialDirection>,

    #[validate(length(min = 1, max = 100))]
    pub material: Option<String>,

    pub quantity: Option<Decimal>,

    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub driver: Option<String>,

    #[validate(length(max = 100))]
    pub vehicle_name: Option<String>,
}

/// Response de movimiento de material
#[derive(Debug, Serialize)]
pub struct MaterialResponse {
    pub id: String,
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

impl From<MaterialEntry> for MaterialResponse {
    fn from(entry: MaterialEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date,
            direction: entry.direction,
            material: entry.material,
            quantity: entry.quantity,
            unit: entry.unit,
            price: entry.price,
            location: entry.location,
            driver: entry.driver,
            vehicle_name: entry.vehicle_name,
            created_at: entry.created_at,
        }
    }
}
