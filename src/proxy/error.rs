//! Gateway error taxonomy and its HTTP mapping.
//!
//! Only failures originating in the upstream client or the auth gate abort
//! a request; line-level parse failures inside the translator are
//! contained there and never reach this module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Upper bound on upstream body text echoed into diagnostics.
pub const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Upstream returned a non-2xx status.
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream returned success with a zero-length body.
    #[error("empty response from upstream")]
    EmptyUpstreamBody,

    /// Connection, DNS, or timeout failure talking to the upstream.
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The non-streaming fallback could not parse the response body.
    #[error("malformed upstream response: {snippet}")]
    MalformedUpstreamResponse { snippet: String },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamStatus { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::EmptyUpstreamBody => StatusCode::BAD_GATEWAY,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::EmptyUpstreamBody => "empty_upstream_body",
            Self::Transport(_) => "upstream_transport",
            Self::MalformedUpstreamResponse { .. } => "malformed_upstream_response",
        }
    }

    /// Truncate upstream body text to a bounded preview. Never echo
    /// unbounded upstream content into error messages.
    pub fn snippet(body: &str) -> String {
        body.chars().take(BODY_PREVIEW_CHARS).collect()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Non-2xx upstream statuses surface the upstream body itself as
        // the detail.
        let detail = match &self {
            Self::UpstreamStatus { body, .. } => body.clone(),
            other => other.to_string(),
        };
        (self.status_code(), Json(json!({ "detail": detail }))).into_response()
    }
}
