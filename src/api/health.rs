//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;
use crate::domain::ScopingPolicy;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub policy: ScopingPolicy,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Returns 200 while the process is up. Does not call the key directory.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        policy: state.key_gateway.policy(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
