//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle de la flota de camiones.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.
//! El campo `name` es la etiqueta de negocio única que usan las
//! transacciones y los reportes de analytics para referirse al vehículo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
///
/// Solo los vehículos `Active` reciben partes de transacciones agrupadas
/// ("All") en el reporte de rentabilidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    InService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::InService => "in_service",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub vehicle_type: Option<String>,
    pub capacity_tons: Option<Decimal>,
    pub year: Option<i32>,
    pub mileage_km: Option<Decimal>,
    pub status: VehicleStatus,
    /// Próxima renovación de la matriculación
    pub next_registration_date: Option<NaiveDate>,
    /// Próximo servicio / revisión de combustible
    pub next_service_date: Option<NaiveDate>,
    /// Vencimiento de la póliza de seguro
    pub insurance_expiry_date: Option<NaiveDate>,
    pub insurance_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
}
