//! Gateway server startup and shutdown.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;

use super::router::{build_router, GatewayState};
use super::timeout::TimeoutConfig;
use super::upstream::UpstreamClient;

/// Bind the listener and serve until ctrl-c.
pub async fn run(bind: &str, config: GatewayConfig) -> Result<()> {
    let config = Arc::new(config);
    let upstream = Arc::new(UpstreamClient::new(config.clone(), TimeoutConfig::default()));
    let app = build_router(GatewayState::new(config, upstream));

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
