use serde::Deserialize;

use crate::domain::{DomainError, ScopingPolicy};

/// Largest page the API Gateway list operations accept
pub const MAX_PAGE_SIZE: u32 = 500;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Json,
}

/// Key directory access and scoping
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub region: String,
    pub rest_api_id: Option<String>,
    pub policy: ScopingPolicy,
    pub page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            region: "eu-south-1".to_string(),
            rest_api_id: None,
            policy: ScopingPolicy::default(),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl GatewayConfig {
    pub fn new(policy: ScopingPolicy, rest_api_id: impl Into<String>) -> Self {
        Self {
            policy,
            rest_api_id: Some(rest_api_id.into()),
            ..Self::default()
        }
    }

    /// The REST API id with surrounding whitespace removed, if set and non-blank
    pub fn rest_api_id(&self) -> Option<&str> {
        self.rest_api_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.region.trim().is_empty() {
            return Err(DomainError::configuration("gateway.region must not be empty"));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(DomainError::configuration(format!(
                "gateway.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.policy.requires_rest_api_id() && self.rest_api_id().is_none() {
            return Err(DomainError::configuration(format!(
                "gateway.rest_api_id (REST_API_ID) is required for the '{}' policy",
                self.policy
            )));
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Platform variables set by the Lambda runtime and deployment
            .set_override_option("gateway.region", std::env::var("AWS_REGION").ok())?
            .set_override_option("gateway.rest_api_id", std::env::var("REST_API_ID").ok())?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gateway.region, "eu-south-1");
        assert_eq!(config.gateway.policy, ScopingPolicy::Stage);
        assert_eq!(config.gateway.page_size, MAX_PAGE_SIZE);
        assert!(config.gateway.rest_api_id.is_none());
    }

    #[test]
    fn test_scoped_policy_requires_rest_api_id() {
        let config = GatewayConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let blank = GatewayConfig::new(ScopingPolicy::UsagePlan, "   ");
        assert!(blank.validate().is_err());

        let valid = GatewayConfig::new(ScopingPolicy::Stage, "restapi123");
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_unscoped_policy_without_rest_api_id() {
        let config = GatewayConfig {
            policy: ScopingPolicy::Unscoped,
            ..GatewayConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = GatewayConfig::new(ScopingPolicy::Stage, "restapi123");

        config.page_size = 0;
        assert!(config.validate().is_err());

        config.page_size = MAX_PAGE_SIZE + 1;
        assert!(config.validate().is_err());

        config.page_size = 25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_region_rejected() {
        let config = GatewayConfig {
            region: String::new(),
            ..GatewayConfig::new(ScopingPolicy::Stage, "restapi123")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rest_api_id_is_trimmed() {
        let config = GatewayConfig::new(ScopingPolicy::Stage, " restapi123 ");
        assert_eq!(config.rest_api_id(), Some("restapi123"));
    }

    #[test]
    fn test_deserialize_partial_gateway_section() {
        let config = config::Config::builder()
            .set_override("gateway.policy", "usage_plan")
            .unwrap()
            .set_override("gateway.rest_api_id", "restapi123")
            .unwrap()
            .build()
            .unwrap();
        let app: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app.gateway.policy, ScopingPolicy::UsagePlan);
        assert_eq!(app.gateway.rest_api_id(), Some("restapi123"));
        assert_eq!(app.gateway.region, "eu-south-1");
        assert_eq!(app.server.port, 8080);
    }
}
