use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::material_dto::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::models::material::MaterialEntry;
use crate::utils::errors::AppError;

pub struct MaterialRepository {
    pool: PgPool,
}

impl MaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateMaterialRequest) -> Result<MaterialEntry, AppError> {
        let entry = sqlx::query_as::<_, MaterialEntry>(
            r#"
            INSERT INTO material_entries (
                id, date, direction, material, quantity, unit, price,
                location, driver, vehicle_name, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.date)
        .bind(request.direction)
        .bind(request.material)
        .bind(request.quantity)
        .bind(request.unit)
        .bind(request.price)
        .bind(request.location)
        .bind(request.driver)
        .bind(request.vehicle_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaterialEntry>, AppError> {
        let entry =
            sqlx::query_as::<_, MaterialEntry>("SELECT * FROM material_entries WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(entry)
    }

    pub async fn find_all(&self) -> Result<Vec<MaterialEntry>, AppError> {
        let entries = sqlx::query_as::<_, MaterialEntry>(
            "SELECT * FROM material_entries ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaterialRequest,
    ) -> Result<MaterialEntry, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movimiento de material no encontrado".to_string()))?;

        let entry = sqlx::query_as::<_, MaterialEntry>(
            r#"
            UPDATE material_entries
            SET date = $2, direction = $3, material = $4, quantity = $5, unit = $6,
                price = $7, location = $8, driver = $9, vehicle_name = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.date.unwrap_or(current.date))
        .bind(request.direction.unwrap_or(current.direction))
        .bind(request.material.unwrap_or(current.material))
        .bind(request.quantity.unwrap_or(current.quantity))
        .bind(request.unit.unwrap_or(current.unit))
        .bind(request.price.or(current.price))
        .bind(request.location.or(current.location))
        .bind(request.driver.or(current.driver))
        .bind(request.vehicle_name.or(current.vehicle_name))
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM material_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Movimiento de material no encontrado".to_string(),
            ));
        }

        Ok(())
    }
}
