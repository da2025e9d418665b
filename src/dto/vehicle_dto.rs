use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 4, max = 20))]
    pub license_plate: String,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    pub capacity_tons: Option<Decimal>,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    pub mileage_km: Option<Decimal>,

    /// Default: active
    pub status: Option<VehicleStatus>,

    pub next_registration_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub insurance_expiry_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50))]
    pub insurance_policy_number: Option<String>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 4, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    pub capacity_tons: Option<Decimal>,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    pub mileage_km: Option<Decimal>,

    pub status: Option<VehicleStatus>,

    pub next_registration_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub insurance_expiry_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50))]
    pub insurance_policy_number: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub name: String,
    pub license_plate: String,
    pub vehicle_type: Option<String>,
    pub capacity_tons: Option<Decimal>,
    pub year: Option<i32>,
    pub mileage_km: Option<Decimal>,
    pub status: VehicleStatus,
    pub next_registration_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub insurance_expiry_date: Option<NaiveDate>,
    pub insurance_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            name: vehicle.name,
            license_plate: vehicle.license_plate,
            vehicle_type: vehicle.vehicle_type,
            capacity_tons: vehicle.capacity_tons,
            year: vehicle.year,
            mileage_km: vehicle.mileage_km,
            status: vehicle.status,
            next_registration_date: vehicle.next_registration_date,
            next_service_date: vehicle.next_service_date,
            insurance_expiry_date: vehicle.insurance_expiry_date,
            insurance_policy_number: vehicle.insurance_policy_number,
            created_at: vehicle.created_at,
        }
    }
}
