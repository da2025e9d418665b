use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::material_controller::MaterialController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::material_dto::{CreateMaterialRequest, MaterialResponse, UpdateMaterialRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_material_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_material))
        .route("/", get(list_materials))
        .route("/:id", get(get_material))
        .route("/:id", put(update_material))
        .route("/:id", delete(delete_material))
}

async fn create_material(
    State(state): State<AppState>,
    Json(request): Json<CreateMaterialRequest>,
) -> Result<Json<ApiResponse<MaterialResponse>>, AppError> {
    let controller = MaterialController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaterialResponse>, AppError> {
    let controller = MaterialController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_materials(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaterialResponse>>, AppError> {
    let controller = MaterialController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaterialRequest>,
) -> Result<Json<ApiResponse<MaterialResponse>>, AppError> {
    let controller = MaterialController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaterialController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Movimiento de material eliminado exitosamente"
    })))
}
