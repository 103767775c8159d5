//! Request/response types for the HTTP surface

pub mod api_keys;
pub mod error;

pub use api_keys::{ListApiKeysResponse, ValidateApiKeyRequest, ValidateApiKeyResponse};
pub use error::{ApiError, ApiErrorResponse};
