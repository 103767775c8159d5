//! CLI module for the API key gateway
//!
//! - `lambda`: run under the AWS Lambda runtime (default)
//! - `serve`: run a plain HTTP server, for local use

pub mod lambda;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// API key gateway - lists and validates API Gateway keys for one REST API
#[derive(Parser)]
#[command(name = "api-key-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Handle requests delivered by the Lambda runtime
    Lambda,

    /// Run an HTTP server on the configured host and port
    Serve,
}

/// Read `.env`, load configuration and install logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
