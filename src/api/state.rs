//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::key_gateway::KeyGatewayService;

/// Application state shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub key_gateway: Arc<KeyGatewayService>,
}

impl AppState {
    pub fn new(key_gateway: KeyGatewayService) -> Self {
        Self {
            key_gateway: Arc::new(key_gateway),
        }
    }
}
