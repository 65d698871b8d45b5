//! The text-model contract implemented by `mockmate-providers`.
//!
//! The evaluator treats the language-model backend as a black box behind this
//! trait: one prompt in, one raw text completion out. Everything about
//! prompt construction and output parsing lives in [`crate::evaluator`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for LLM backends that complete a single prompt.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Run one completion. A single attempt; the caller decides what a
    /// failure means.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;
}

/// Request for one text completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gemini-1.5-pro").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a text completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually produced the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Strip a markdown code fence from a model reply, leaving the JSON payload.
///
/// Models asked for "ONLY valid JSON" still frequently wrap the object in
/// ```` ```json ```` fences. Handles:
/// - ```` ```json ```` and bare ```` ``` ```` fences
/// - unclosed (truncated) fences
/// - raw JSON with no fence (returned trimmed as-is)
pub fn extract_json_block(response: &str) -> String {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the language tag on the opening fence line, if any.
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => rest,
    };

    let body = match body.rfind("```") {
        Some(idx) => &body[..idx],
        None => body,
    };

    body.trim().to_string()
}
