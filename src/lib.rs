//! API key gateway
//!
//! Lists and validates AWS API Gateway keys for a single REST API, scoping
//! keys by usage plan membership, by stage association, or not at all.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::DomainError;
use infrastructure::key_directory::AwsKeyDirectory;
use infrastructure::key_gateway::KeyGatewayService;

/// Create the application state backed by the AWS key directory
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    config.gateway.validate()?;

    let directory = AwsKeyDirectory::from_config(&config.gateway).await;
    let service = KeyGatewayService::new(Arc::new(directory), &config.gateway)?;

    Ok(AppState::new(service))
}
