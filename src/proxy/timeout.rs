//! Timeout configuration for upstream requests.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    /// Time to establish the TCP connection.
    pub connect: Duration,
    /// Total time for the complete request/response exchange.
    pub request: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration with explicit values.
    pub fn new(connect_secs: u64, request_secs: u64) -> Self {
        Self {
            connect: Duration::from_secs(connect_secs),
            request: Duration::from_secs(request_secs),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(60),
        }
    }
}
