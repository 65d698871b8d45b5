//! HTTP surface: session start, answer submission, summary.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use mockmate_core::model::{Evaluation, Question, Round};
use mockmate_core::summary::SessionSummary;

use crate::error::ApiError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/start_session", post(start_session))
        .route("/answer", post(answer))
        .route("/summary/:session_id", get(summary))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Question as exposed over the wire. Holds what the client needs to render
/// the prompt; bank internals like sample good points stay server-side.
#[derive(Debug, Serialize)]
pub struct QuestionPayload {
    pub id: String,
    pub text: String,
    pub round: Round,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl From<&Question> for QuestionPayload {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            round: q.round,
            difficulty: q.difficulty.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_name: String,
    pub job_role: String,
    pub interview_type: String,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    pub question: QuestionPayload,
    pub total_questions: usize,
}

async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>), ApiError> {
    let session = state.engine.start_session(
        &request.user_name,
        &request.job_role,
        &request.interview_type,
    )?;

    // A created session always has at least one question; an empty one
    // would have been rejected as BankExhausted.
    let first = session
        .current_question()
        .expect("new session has a first question");

    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse {
            session_id: session.id,
            question: first.into(),
            total_questions: session.total_questions(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub session_id: Uuid,
    pub question_id: String,
    pub user_answer_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub evaluation: Evaluation,
    pub next_question: Option<QuestionPayload>,
    pub position: usize,
    pub completed: bool,
}

async fn answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let outcome = state
        .engine
        .submit_answer(
            request.session_id,
            &request.question_id,
            &request.user_answer_text,
        )
        .await?;

    Ok(Json(AnswerResponse {
        evaluation: outcome.evaluation,
        next_question: outcome.next_question.as_ref().map(QuestionPayload::from),
        position: outcome.position,
        completed: outcome.completed,
    }))
}

async fn summary(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(state.engine.summary(session_id)?))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
