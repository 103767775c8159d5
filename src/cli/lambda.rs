//! Lambda command - serves the router through the Lambda runtime API

use tracing::info;

use crate::api::create_router;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    info!(
        policy = %config.gateway.policy,
        region = %config.gateway.region,
        "Starting Lambda handler"
    );

    lambda_http::run(app)
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e))
}
