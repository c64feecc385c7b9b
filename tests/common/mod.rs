//! Shared helpers for integration tests.

use std::sync::Arc;

use deepgate::config::GatewayConfig;
use deepgate::proxy::router::{build_router, GatewayState};
use deepgate::proxy::timeout::TimeoutConfig;
use deepgate::proxy::upstream::UpstreamClient;

pub const TEST_TOKEN: &str = "sk-114514";

/// Build a gateway router pointed at the given upstream URL.
pub fn test_router(upstream_url: &str) -> axum::Router {
    let config = Arc::new(GatewayConfig::new(
        TEST_TOKEN.to_string(),
        upstream_url.to_string(),
        "test-agent".to_string(),
    ));
    let upstream = Arc::new(UpstreamClient::new(config.clone(), TimeoutConfig::new(5, 10)));
    build_router(GatewayState::new(config, upstream))
}
