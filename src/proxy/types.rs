//! Wire types for the client-facing chat API and the upstream dialect.

use serde::{Deserialize, Serialize};

/// Chat message, passed through to the upstream verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

/// Body forwarded to the upstream chat endpoint. Immutable after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload {
    pub messages: Vec<ChatMessage>,
    pub model: String,
}

/// OpenAI-compatible completion envelope for non-streaming responses.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: &'static str,
    pub created: u64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: &'static str,
}

/// Token accounting. The upstream exposes none, so every field stays zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
