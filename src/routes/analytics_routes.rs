use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::controllers::analytics_controller::AnalyticsController;
use crate::models::analytics::{Notification, Period, ProfitabilityReport};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_analytics_router() -> Router<AppState> {
    Router::new()
        .route("/profitability", get(get_profitability))
        .route("/notifications", get(get_notifications))
}

#[derive(Debug, Deserialize)]
struct ProfitabilityQuery {
    period: Option<Period>,
}

async fn get_profitability(
    State(state): State<AppState>,
    Query(query): Query<ProfitabilityQuery>,
) -> Result<Json<ProfitabilityReport>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let report = controller
        .profitability(query.period.unwrap_or_default(), Utc::now())
        .await?;
    Ok(Json(report))
}

async fn get_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let notifications = controller.notifications(Utc::now()).await?;
    Ok(Json(notifications))
}
