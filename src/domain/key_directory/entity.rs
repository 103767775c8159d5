//! Records read from the key directory

use serde::{Deserialize, Serialize};

/// API key as held by the key directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    /// Secret value, only present when explicitly requested
    pub value: Option<String>,
    /// Stage associations in `"{rest_api_id}/{stage}"` form
    pub stage_keys: Vec<String>,
}

impl ApiKeyRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
            stage_keys: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_stage_key(mut self, stage_key: impl Into<String>) -> Self {
        self.stage_keys.push(stage_key.into());
        self
    }

    /// True when one of the stage keys belongs to the given REST API
    pub fn is_attached_to(&self, rest_api_id: &str) -> bool {
        self.stage_keys
            .iter()
            .any(|stage_key| stage_key_matches(stage_key, rest_api_id))
    }

    /// Compares the stored secret against a candidate in constant time.
    /// A record fetched without its value never matches.
    pub fn value_matches(&self, candidate: &str) -> bool {
        self.value
            .as_deref()
            .is_some_and(|stored| constant_time_compare(stored, candidate))
    }
}

/// Public view of a key returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeySummary {
    pub id: String,
    pub name: String,
}

impl From<ApiKeyRecord> for ApiKeySummary {
    fn from(record: ApiKeyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// A deployed API stage served by a usage plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStage {
    pub api_id: String,
    pub stage: Option<String>,
}

impl ApiStage {
    pub fn new(api_id: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            stage: Some(stage.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePlan {
    pub id: String,
    pub api_stages: Vec<ApiStage>,
}

impl UsagePlan {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api_stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: ApiStage) -> Self {
        self.api_stages.push(stage);
        self
    }

    pub fn serves_api(&self, rest_api_id: &str) -> bool {
        self.api_stages.iter().any(|stage| stage.api_id == rest_api_id)
    }
}

/// Association of a key with a usage plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePlanKey {
    pub usage_plan_id: String,
    pub key_id: String,
}

impl UsagePlanKey {
    pub fn new(usage_plan_id: impl Into<String>, key_id: impl Into<String>) -> Self {
        Self {
            usage_plan_id: usage_plan_id.into(),
            key_id: key_id.into(),
        }
    }
}

/// Outcome of fetching a single key by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    Found(ApiKeyRecord),
    NotFound,
}

impl KeyLookup {
    pub fn into_found(self) -> Option<ApiKeyRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Stage keys look like `restapi123/prod`; the separator is part of the match
/// so `restapi1` does not claim `restapi12/prod`.
pub fn stage_key_matches(stage_key: &str, rest_api_id: &str) -> bool {
    stage_key
        .strip_prefix(rest_api_id)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_key_matches() {
        assert!(stage_key_matches("restapi123/stage", "restapi123"));
        assert!(stage_key_matches("restapi123/", "restapi123"));
        assert!(!stage_key_matches("otherapi/stage", "restapi123"));
        assert!(!stage_key_matches("restapi1234/stage", "restapi123"));
        assert!(!stage_key_matches("restapi123", "restapi123"));
    }

    #[test]
    fn test_is_attached_to() {
        let record = ApiKeyRecord::new("123abc", "Key 1")
            .with_stage_key("otherapi/prod")
            .with_stage_key("restapi123/stage");

        assert!(record.is_attached_to("restapi123"));
        assert!(record.is_attached_to("otherapi"));
        assert!(!record.is_attached_to("restapi"));
    }

    #[test]
    fn test_value_matches() {
        let record = ApiKeyRecord::new("123abc", "Key 1").with_value("the-key-value");

        assert!(record.value_matches("the-key-value"));
        assert!(!record.value_matches("wrong-value"));
        assert!(!record.value_matches("the-key-valu"));
    }

    #[test]
    fn test_value_matches_without_stored_value() {
        let record = ApiKeyRecord::new("123abc", "Key 1");
        assert!(!record.value_matches(""));
        assert!(!record.value_matches("anything"));
    }

    #[test]
    fn test_usage_plan_serves_api() {
        let plan = UsagePlan::new("plan1")
            .with_stage(ApiStage::new("restapi123", "prod"))
            .with_stage(ApiStage::new("otherapi", "prod"));

        assert!(plan.serves_api("restapi123"));
        assert!(!plan.serves_api("restapi"));
        assert!(!UsagePlan::new("empty").serves_api("restapi123"));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = ApiKeySummary::from(ApiKeyRecord::new("123abc", "Key 1").with_value("s"));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json, serde_json::json!({"id": "123abc", "name": "Key 1"}));
    }
}
