use std::fmt;

use serde::{Deserialize, Serialize};

/// Decides which directory keys are relevant to the configured REST API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopingPolicy {
    /// Every key in the directory is relevant
    Unscoped,
    /// Keys attached to a usage plan that serves the REST API
    UsagePlan,
    /// Keys carrying a stage key for the REST API
    #[default]
    Stage,
}

impl ScopingPolicy {
    pub fn requires_rest_api_id(&self) -> bool {
        !matches!(self, Self::Unscoped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscoped => "unscoped",
            Self::UsagePlan => "usage_plan",
            Self::Stage => "stage",
        }
    }
}

impl fmt::Display for ScopingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
