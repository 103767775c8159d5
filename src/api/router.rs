use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::api_keys;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Key endpoints
        .route("/api-keys", get(api_keys::list_api_keys))
        .route("/validate-api-key", post(api_keys::validate_api_key))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
