//! HTTP routing layer: path dispatch, auth gating, and the translation
//! pipeline.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::Stream;

use crate::config::GatewayConfig;
use crate::models;

use super::auth;
use super::envelope;
use super::stream;
use super::types::{ChatRequest, UpstreamPayload};
use super::upstream::UpstreamClient;

#[derive(Clone)]
pub struct GatewayState {
    config: Arc<GatewayConfig>,
    upstream: Arc<UpstreamClient>,
}

impl GatewayState {
    pub fn new(config: Arc<GatewayConfig>, upstream: Arc<UpstreamClient>) -> Self {
        Self { config, upstream }
    }
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/models", get(list_models_handler))
        .route("/v1/chat/completions", post(chat_completions_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_models_handler() -> Json<models::ModelList> {
    Json(models::model_catalog())
}

async fn chat_completions_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Response {
    // The auth gate runs before anything touches the upstream.
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if !auth::verify_token(credential, &state.config.api_token) {
        return unauthorized();
    }

    let model = models::map_model_name(request.model.as_deref());
    let payload = UpstreamPayload {
        messages: request.messages,
        model: model.to_string(),
    };

    let response = match state.upstream.send(&payload, request.stream).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(
                error = %err,
                error_type = %err.error_type(),
                "upstream request failed"
            );
            return err.into_response();
        }
    };

    if request.stream {
        return sse_response(stream::relay_sse(response.bytes_stream()));
    }

    match stream::collect_content(response.bytes_stream()).await {
        Ok(content) => Json(envelope::completion(content, model)).into_response(),
        Err(err) => {
            tracing::error!(
                error = %err,
                error_type = %err.error_type(),
                "failed to aggregate upstream response"
            );
            err.into_response()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(serde_json::json!({ "detail": "Invalid or missing authentication token" })),
    )
        .into_response()
}

/// Frame relayed lines as the client's SSE response. The content type
/// deliberately carries no charset suffix; some client implementations
/// reject `text/event-stream; charset=utf-8`.
fn sse_response(
    lines: impl Stream<Item = Result<String, Infallible>> + Send + 'static,
) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(lines))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
