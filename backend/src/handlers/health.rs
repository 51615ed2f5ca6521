use axum::extract::{Json, State};
use std::sync::Arc;

use crate::AppState;
use crate::models::HealthResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Assistant"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.pipeline.model_name().to_string(),
    })
}
