//! API key listing and validation endpoints

use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ListApiKeysResponse, ValidateApiKeyRequest, ValidateApiKeyResponse,
};

/// GET /api-keys
pub async fn list_api_keys(
    State(state): State<AppState>,
) -> Result<Json<ListApiKeysResponse>, ApiError> {
    debug!("Listing API keys");

    let api_keys = state.key_gateway.list_api_keys().await?;

    Ok(Json(ListApiKeysResponse { api_keys }))
}

/// POST /validate-api-key
pub async fn validate_api_key(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidateApiKeyResponse>, ApiError> {
    let request = parse_validate_request(&body)?;

    let api_key_id = request.api_key_id.unwrap_or_default();
    let api_key_value = request.api_key_value.unwrap_or_default();

    let valid = state
        .key_gateway
        .validate_api_key(&api_key_id, &api_key_value)
        .await?;

    Ok(Json(ValidateApiKeyResponse { valid }))
}

/// An empty body reads as `{}`
fn parse_validate_request(body: &[u8]) -> Result<ValidateApiKeyRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ValidateApiKeyRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}
