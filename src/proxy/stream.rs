//! Streaming response translator.
//!
//! The upstream delivers its SSE body as byte fragments with arbitrary
//! boundaries: a fragment may split a line mid-prefix or mid-character,
//! carry several lines at once, or be empty. Both output modes share the
//! same ingestion state, a single byte buffer holding the unterminated
//! tail. Every complete line is drained before the next fragment is
//! appended, and decoding happens only on complete lines so split
//! multi-byte characters are never corrupted.
//!
//! - Streaming mode forwards each `data:` line verbatim, re-terminated
//!   with a blank line, in assembly order.
//! - Non-streaming mode parses each line's JSON payload and accumulates
//!   `choices[0].delta.content` into one string.
//!
//! Failures while handling one line are contained at the line boundary;
//! the line is dropped and processing continues.

use std::convert::Infallible;
use std::fmt::Display;

use bytes::Bytes;
use futures::{Stream, StreamExt};

use super::error::GatewayError;

const DATA_PREFIX: &str = "data: ";
const DONE_PAYLOAD: &str = "[DONE]";

/// Split off the first newline-terminated line from `buffer`.
///
/// Returns `None` while the buffer holds only an unterminated tail. The
/// buffer is raw bytes so that a multi-byte character split across
/// fragments stays intact until its line completes; decoding happens per
/// extracted line. A trailing carriage return is stripped.
fn drain_line(buffer: &mut Vec<u8>) -> Option<String> {
    let newline = buffer.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=newline).collect();
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(String::from_utf8_lossy(&line).into_owned())
}

/// Forward upstream `data:` lines (including `data: [DONE]`) to the client
/// verbatim, each re-terminated with a blank line.
///
/// Lines are passed through without parsing or reformatting their JSON, so
/// upstream-specific fields survive. Each line is yielded before the next
/// fragment is requested, so a slow client write stalls further upstream
/// reads. Anything left in the buffer without a trailing newline when the
/// upstream closes is incomplete and discarded.
pub fn relay_sse<S, E>(upstream: S) -> impl Stream<Item = Result<String, Infallible>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut buffer = Vec::new();
        futures::pin_mut!(upstream);

        while let Some(chunk) = upstream.next().await {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::warn!(error = %err, "upstream stream ended early");
                    break;
                }
            };
            buffer.extend_from_slice(&bytes);

            while let Some(line) = drain_line(&mut buffer) {
                if !line.starts_with(DATA_PREFIX) {
                    continue;
                }
                yield Ok(format!("{}\n\n", line));
            }
        }

        if !buffer.is_empty() {
            tracing::debug!(len = buffer.len(), "discarding unterminated stream tail");
        }
    }
}

/// Accumulate the delta text of every well-formed `data:` line into a
/// single string.
///
/// Lines whose JSON is malformed or not shaped like a delta chunk are
/// skipped without aborting the response. If no content was extracted at
/// all when the stream ends, the entire body is re-parsed as one JSON
/// document with a top-level `content` field; failing that, the response
/// is malformed.
pub async fn collect_content<S, E>(upstream: S) -> Result<String, GatewayError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut buffer = Vec::new();
    let mut raw = Vec::new();
    let mut content = String::new();
    futures::pin_mut!(upstream);

    while let Some(chunk) = upstream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "upstream stream ended early");
                break;
            }
        };
        raw.extend_from_slice(&bytes);
        buffer.extend_from_slice(&bytes);

        while let Some(line) = drain_line(&mut buffer) {
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            if payload == DONE_PAYLOAD {
                continue;
            }
            if let Some(delta) = delta_content(payload) {
                content.push_str(&delta);
            }
        }
    }

    if !content.is_empty() {
        return Ok(content);
    }

    // Some upstream response shapes skip SSE framing entirely; fall back
    // to reading the whole body as a single JSON document.
    match serde_json::from_slice::<serde_json::Value>(&raw) {
        Ok(value) => Ok(value
            .get("content")
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string()),
        Err(_) => Err(GatewayError::MalformedUpstreamResponse {
            snippet: GatewayError::snippet(&String::from_utf8_lossy(&raw)),
        }),
    }
}

/// Extract `choices[0].delta.content` from one SSE data payload.
fn delta_content(payload: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}
