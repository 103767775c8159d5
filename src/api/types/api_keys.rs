use serde::{Deserialize, Serialize};

use crate::domain::ApiKeySummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeySummary>,
}

/// Body of `POST /validate-api-key`. Both fields are optional here so that a
/// missing field yields the "required" error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateApiKeyRequest {
    #[serde(default)]
    pub api_key_id: Option<String>,
    #[serde(default)]
    pub api_key_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateApiKeyResponse {
    pub valid: bool,
}
