//! Model backend error types.
//!
//! The evaluator adapter treats every one of these the same way (single
//! attempt, fall back to neutral scores), but typed variants keep the
//! fallback reason and the logs precise.

use thiserror::Error;

/// Errors from a text-model backend call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid or missing API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
