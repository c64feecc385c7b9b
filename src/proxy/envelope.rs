//! OpenAI-compatible response envelope construction.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use super::types::{ChatCompletion, ChatMessage, CompletionChoice, Usage};

/// Wrap aggregated content in a `chat.completion` object.
///
/// A fresh identifier and timestamp are generated on every call; usage
/// stays zero because the upstream exposes no token accounting.
pub fn completion(content: String, model: &str) -> ChatCompletion {
    let hex = Uuid::new_v4().simple().to_string();
    let created = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    ChatCompletion {
        id: format!("chatcmpl-{}", &hex[..10]),
        object: "chat.completion",
        created,
        model: model.to_string(),
        choices: vec![CompletionChoice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: "stop",
        }],
        usage: Usage::default(),
    }
}
