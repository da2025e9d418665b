use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::material_dto::{CreateMaterialRequest, MaterialResponse, UpdateMaterialRequest};
use crate::repositories::material_repository::MaterialRepository;
use crate::utils::errors::AppError;

pub struct MaterialController {
    repository: MaterialRepository,
}

impl MaterialController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaterialRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateMaterialRequest,
    ) -> Result<ApiResponse<MaterialResponse>, AppError> {
        request.validate()?;

        if request.quantity <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "La cantidad debe ser mayor que cero".to_string(),
            ));
        }

        let entry = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            MaterialResponse::from(entry),
            "Movimiento de material registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaterialResponse, AppError> {
        let entry = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movimiento de material no encontrado".to_string()))?;

        Ok(MaterialResponse::from(entry))
    }

    pub async fn list(&self) -> Result<Vec<MaterialResponse>, AppError> {
        let entries = self.repository.find_all().await?;
        Ok(entries.into_iter().map(MaterialResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaterialRequest,
    ) -> Result<ApiResponse<MaterialResponse>, AppError> {
        request.validate()?;

        if let Some(quantity) = request.quantity {
            if quantity <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "La cantidad debe ser mayor que cero".to_string(),
                ));
            }
        }

        let entry = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            MaterialResponse::from(entry),
            "Movimiento de material actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
