//! Model alias table and catalog.
//!
//! Public model identifiers are mapped to the upstream's internal
//! identifiers before forwarding. The mapping is a pure total function:
//! absent, empty, or unrecognized names fall back to [`DEFAULT_MODEL`].

use serde::Serialize;
use serde_json::Value;

/// Internal identifier used when the client names no known model.
pub const DEFAULT_MODEL: &str = "deepseek70b";

/// OpenAI-compatible model descriptor for the discovery endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub object: &'static str,
    pub created: u64,
    pub owned_by: &'static str,
    pub permission: Vec<Value>,
    pub root: &'static str,
    pub parent: Option<&'static str>,
}

/// `GET /v1/models` response body.
#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelDescriptor>,
}

/// Map a public model name to the upstream-internal identifier.
pub fn map_model_name(name: Option<&str>) -> &'static str {
    match name.unwrap_or_default() {
        "deepseek-r1-70b" => "deepseek70b",
        "deepseek-r1-turbo" | "deepseek-ai/DeepSeek-R1-Turbo" => "deepseekr1turbo",
        "deepseek-v3-turbo" | "deepseek-ai/DeepSeek-V3-Turbo" => "deepseekv3turbo",
        "deepseek-v3-0324" => "deepseekv30324",
        "deepseek-r1-search" => "volcengine",
        "grok-3" => "grok3",
        "grok-3-search" => "grok3search",
        "grok-3-deepsearch" => "grok3deepsearch",
        "grok-3-reasoning" => "grok3reasoning",
        "qwen-32b" | "qwq-32b" => "qwen32b",
        _ => DEFAULT_MODEL,
    }
}

/// Static catalog of advertised models.
pub fn model_catalog() -> ModelList {
    ModelList {
        object: "list",
        data: vec![
            descriptor("deepseek-r1-70b", 1677610602, "deepseek", "deepseek70b"),
            descriptor("deepseek-r1-turbo", 1677650000, "deepseek", "deepseekr1turbo"),
            descriptor("deepseek-v3-turbo", 1677650100, "deepseek", "deepseekv3turbo"),
            descriptor("deepseek-v3-0324", 1677650200, "deepseek", "deepseekv30324"),
            descriptor("deepseek-r1-search", 1677650300, "deepseek", "volcengine"),
            descriptor("grok-3", 1677650400, "xai", "grok3"),
            descriptor("grok-3-search", 1677650500, "xai", "grok3search"),
            descriptor("grok-3-deepsearch", 1677650600, "xai", "grok3deepsearch"),
            descriptor("grok-3-reasoning", 1677650700, "xai", "grok3reasoning"),
            descriptor("qwen-32b", 1677650800, "alibaba", "qwen32b"),
        ],
    }
}

fn descriptor(
    id: &'static str,
    created: u64,
    owned_by: &'static str,
    root: &'static str,
) -> ModelDescriptor {
    ModelDescriptor {
        id,
        object: "model",
        created,
        owned_by,
        permission: Vec::new(),
        root,
        parent: None,
    }
}
