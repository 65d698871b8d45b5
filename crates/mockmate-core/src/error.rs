//! Typed error taxonomy for the session engine and store.
//!
//! Engine-level errors propagate to the API boundary where they map onto
//! client or server error responses. Evaluator failures never appear here;
//! they are absorbed by the fallback evaluation inside the adapter.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by [`crate::engine::SessionEngine`] operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown session identifier.
    #[error("session not found: {0}")]
    NotFound(Uuid),

    /// An answer was submitted to a completed session.
    #[error("session {0} is already completed")]
    SessionCompleted(Uuid),

    /// Submitted question id does not match the question at the current
    /// position. Guards against out-of-order or replayed submissions; the
    /// session is left untouched.
    #[error("question mismatch: expected {expected}, got {got}")]
    QuestionMismatch { expected: String, got: String },

    /// The combined bank cannot fill a session of the configured length.
    #[error("question bank exhausted: needed {needed}, bank holds {available}")]
    BankExhausted { needed: usize, available: usize },

    /// Underlying persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the durable session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(Uuid),

    #[error("session already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("session store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}
