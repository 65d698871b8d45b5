//! API-level error mapping.
//!
//! Engine errors arrive typed and map onto HTTP statuses here; handlers
//! return `Result<T, ApiError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use mockmate_core::error::EngineError;

/// HTTP-facing error. Built from [`EngineError`] by the handlers.
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            EngineError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                format!("session not found: {id}"),
            ),
            EngineError::SessionCompleted(id) => (
                StatusCode::CONFLICT,
                "SESSION_COMPLETED",
                format!("session {id} is already completed"),
            ),
            EngineError::QuestionMismatch { expected, got } => (
                StatusCode::CONFLICT,
                "QUESTION_MISMATCH",
                format!("expected question {expected}, got {got}"),
            ),
            EngineError::BankExhausted { needed, available } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BANK_EXHAUSTED",
                format!("question bank holds {available} questions, session needs {needed}"),
            ),
            EngineError::Store(e) => {
                tracing::error!("session store failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_FAILURE",
                    "session storage failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
