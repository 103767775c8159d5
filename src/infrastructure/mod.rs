//! Infrastructure layer - directory adapters, services and logging

pub mod key_directory;
pub mod key_gateway;
pub mod logging;
