//! HTTP error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Body of every error response: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        &self.response.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Directory { operation, message } => {
                error!(operation = %operation, error = %message, "Key directory request failed");
                Self::bad_gateway("key directory request failed")
            }
            DomainError::Configuration { message } => {
                error!(error = %message, "Configuration error");
                Self::internal("internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("api_key_id and api_key_value are required");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "api_key_id and api_key_value are required");
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api_err: ApiError = DomainError::validation("missing").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.message(), "missing");
    }

    #[test]
    fn test_directory_error_is_not_leaked() {
        let api_err: ApiError =
            DomainError::directory("GetApiKey", "AccessDeniedException: arn:aws:iam::1234").into();

        assert_eq!(api_err.status, StatusCode::BAD_GATEWAY);
        assert!(!api_err.message().contains("arn:aws"));
    }

    #[test]
    fn test_configuration_maps_to_internal() {
        let api_err: ApiError = DomainError::configuration("no rest api").into();
        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::bad_request("api_key_id and api_key_value are required");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"error": "api_key_id and api_key_value are required"})
        );
    }
}
