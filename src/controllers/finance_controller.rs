use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::finance_dto::{CreateTransactionRequest, TransactionResponse};
use crate::models::transaction::VehicleRef;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct FinanceController {
    repository: TransactionRepository,
    vehicle_repository: VehicleRepository,
}

impl FinanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TransactionRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool),
        }
    }

    /// Las transacciones son inmutables una vez creadas: solo alta,
    /// listado y baja.
    pub async fn create(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<ApiResponse<TransactionResponse>, AppError> {
        request.validate()?;

        if request.amount < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El monto no puede ser negativo".to_string(),
            ));
        }

        if let VehicleRef::Specific(name) = &request.vehicle {
            if !self.vehicle_repository.name_exists(name, None).await? {
                return Err(AppError::BadRequest(format!(
                    "El vehículo '{}' no existe",
                    name
                )));
            }
        }

        let transaction = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            TransactionResponse::from(transaction),
            "Transacción registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TransactionResponse, AppError> {
        let transaction = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Transacción no encontrada".to_string()))?;

        Ok(TransactionResponse::from(transaction))
    }

    pub async fn list(&self) -> Result<Vec<TransactionResponse>, AppError> {
        let transactions = self.repository.find_all().await?;
        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
