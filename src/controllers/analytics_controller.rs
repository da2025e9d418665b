use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::analytics::{Notification, Period, ProfitabilityReport};
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::analytics_service;
use crate::utils::errors::AppError;

pub struct AnalyticsController {
    vehicle_repository: VehicleRepository,
    transaction_repository: TransactionRepository,
}

impl AnalyticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicle_repository: VehicleRepository::new(pool.clone()),
            transaction_repository: TransactionRepository::new(pool),
        }
    }

    /// Reporte de rentabilidad por vehículo para el período pedido.
    /// El reloj llega como parámetro para que el cálculo sea
    /// determinista; los handlers pasan `Utc::now()`.
    pub async fn profitability(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<ProfitabilityReport, AppError> {
        let vehicles = self.vehicle_repository.find_all().await?;
        let start = analytics_service::period_start(period, now).date_naive();
        let transactions = self
            .transaction_repository
            .find_by_date_range(start, now.date_naive())
            .await?;

        Ok(analytics_service::compute_vehicle_profitability(
            period,
            &vehicles,
            &transactions,
            now,
        ))
    }

    /// Notificaciones de vencimientos, recalculadas en cada lectura
    pub async fn notifications(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, AppError> {
        let vehicles = self.vehicle_repository.find_all().await?;
        Ok(analytics_service::compute_notifications(&vehicles, now))
    }
}
