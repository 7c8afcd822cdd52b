use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct PingResponse {
    message: &'static str,
}

/// Liveness check
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    store: String,
}

/// Readiness check endpoint
///
/// Replays the log, so a closed or failing store reports 503.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    state.repository.load(&state.op_context()).await?;

    Ok(Json(ReadinessResponse {
        status: "ready",
        store: state.repository.address(),
    }))
}
