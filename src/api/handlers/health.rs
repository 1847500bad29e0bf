//! Handler for the health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports service liveness and cache backend health.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always returns 200: a degraded cache is not an outage, resolution falls
/// back to the store.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = if state.cache.health_check().await {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: "ok",
        cache,
    })
}
