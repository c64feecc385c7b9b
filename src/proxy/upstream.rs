//! Outbound client for the upstream chat endpoint.
//!
//! The upstream is an undocumented browser-facing API, so requests carry a
//! browser-shaped header set (user-agent, origin/referer, client hints) or
//! they are rejected. On success the response is returned as a handle over
//! an incrementally-readable byte stream; the body is never buffered here,
//! which lets the translator start re-framing before the upstream finishes
//! sending.

use std::sync::Arc;

use reqwest::header;
use reqwest::Client;

use crate::config::GatewayConfig;

use super::error::GatewayError;
use super::timeout::TimeoutConfig;
use super::types::UpstreamPayload;

pub struct UpstreamClient {
    client: Client,
    config: Arc<GatewayConfig>,
    timeouts: TimeoutConfig,
}

impl UpstreamClient {
    pub fn new(config: Arc<GatewayConfig>, timeouts: TimeoutConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .build()
            .expect("Failed to build upstream client");

        Self {
            client,
            config,
            timeouts,
        }
    }

    /// Send the translated payload upstream with a single POST.
    ///
    /// `want_stream` only selects the `Accept` header
    /// (`text/event-stream` vs `*/*`); the upstream answers with SSE
    /// framing either way.
    pub async fn send(
        &self,
        payload: &UpstreamPayload,
        want_stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        tracing::debug!(
            model = %payload.model,
            stream = want_stream,
            "forwarding chat request upstream"
        );

        let accept = if want_stream { "text/event-stream" } else { "*/*" };

        let response = self
            .client
            .post(&self.config.upstream_url)
            .timeout(self.timeouts.request)
            .header(header::ACCEPT, accept)
            .header(header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9,en;q=0.8")
            .header(header::ORIGIN, &self.config.origin)
            .header(header::REFERER, &self.config.referer)
            .header(header::USER_AGENT, &self.config.user_agent)
            .header("priority", "u=1, i")
            .header(
                "sec-ch-ua",
                "\"Chromium\";v=\"134\", \"Not:A-Brand\";v=\"24\", \"Google Chrome\";v=\"134\"",
            )
            .header("sec-ch-ua-mobile", "?0")
            .header("sec-ch-ua-platform", "\"Windows\"")
            .header("sec-fetch-dest", "empty")
            .header("sec-fetch-mode", "cors")
            .header("sec-fetch-site", "same-origin")
            .header("referrer-policy", "strict-origin-when-cross-origin")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        if response.content_length() == Some(0) {
            return Err(GatewayError::EmptyUpstreamBody);
        }

        Ok(response)
    }
}
