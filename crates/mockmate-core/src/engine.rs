//! The session engine: question sequencing, answer recording, completion.
//!
//! One engine instance serves all sessions. Dependencies (bank, evaluator,
//! store) are passed in explicitly so tests can substitute in-memory fakes.
//! Control is strictly synchronous request/response; the evaluator call is
//! the only await point.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::{EngineError, StoreError};
use crate::evaluator::AnswerEvaluator;
use crate::model::{AnswerRecord, Evaluation, Question, Round, Session, SessionStatus};
use crate::store::SessionStore;
use crate::summary::{summarize, SessionSummary};

/// How a session is populated.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Fixed number of questions per session.
    pub total_questions: usize,
    /// How many of those come from the behavioral round (Round 1). The
    /// remainder is DSA/CS fundamentals (Round 2).
    pub behavioral_count: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            total_questions: 10,
            behavioral_count: 5,
        }
    }
}

/// Result of recording one answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub evaluation: Evaluation,
    /// `None` once the session is completed.
    pub next_question: Option<Question>,
    pub position: usize,
    pub completed: bool,
}

/// Orchestrates the session lifecycle over the bank, evaluator, and store.
pub struct SessionEngine {
    bank: QuestionBank,
    evaluator: AnswerEvaluator,
    store: Arc<dyn SessionStore>,
    settings: SessionSettings,
}

impl SessionEngine {
    pub fn new(
        bank: QuestionBank,
        evaluator: AnswerEvaluator,
        store: Arc<dyn SessionStore>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            bank,
            evaluator,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Create and persist a new session. Behavioral questions come first,
    /// then DSA/CS fundamentals; selection is seeded by the session id so an
    /// assigned sequence is reproducible.
    pub fn start_session(
        &self,
        user_name: &str,
        job_role: &str,
        interview_type: &str,
    ) -> Result<Session, EngineError> {
        let id = Uuid::new_v4();
        let seed = session_seed(id);
        let total = self.settings.total_questions;
        let behavioral_count = self.settings.behavioral_count.min(total);

        let mut questions =
            self.bank
                .select(Round::Behavioral, behavioral_count, &HashSet::new(), seed);
        let exclude: HashSet<String> = questions.iter().map(|q| q.id.clone()).collect();
        questions.extend(self.bank.select(
            Round::DsaFundamentals,
            total - questions.len(),
            &exclude,
            seed,
        ));

        if questions.len() < total {
            return Err(EngineError::BankExhausted {
                needed: total,
                available: self.bank.len(),
            });
        }

        let session = Session {
            id,
            user_name: user_name.to_string(),
            job_role: job_role.to_string(),
            interview_type: interview_type.to_string(),
            created_at: Utc::now(),
            questions,
            position: 0,
            answers: vec![],
            status: SessionStatus::InProgress,
        };

        self.store.create(&session)?;
        tracing::info!(session_id = %id, user = user_name, role = job_role, "session started");
        Ok(session)
    }

    /// Record an answer for the question at the current position, advance,
    /// and persist. The evaluation never fails; an evaluator outage yields
    /// the neutral fallback.
    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        question_id: &str,
        answer_text: &str,
    ) -> Result<AnswerOutcome, EngineError> {
        let mut session = self.load(session_id)?;

        if session.is_completed() {
            return Err(EngineError::SessionCompleted(session_id));
        }
        let Some(current) = session.current_question().cloned() else {
            return Err(EngineError::SessionCompleted(session_id));
        };
        if current.id != question_id {
            return Err(EngineError::QuestionMismatch {
                expected: current.id,
                got: question_id.to_string(),
            });
        }

        let evaluation = self
            .evaluator
            .evaluate(&current, answer_text, &session.job_role)
            .await;

        session.answers.push(AnswerRecord {
            question_id: current.id.clone(),
            question_text: current.text.clone(),
            answer_text: answer_text.to_string(),
            evaluation: evaluation.clone(),
            answered_at: Utc::now(),
        });
        session.position += 1;
        if session.position == session.total_questions() {
            session.status = SessionStatus::Completed;
        }
        debug_assert_eq!(session.answers.len(), session.position);

        self.store.update(&session)?;

        let completed = session.is_completed();
        tracing::info!(
            session_id = %session_id,
            position = session.position,
            completed,
            overall = evaluation.overall,
            "answer recorded"
        );

        Ok(AnswerOutcome {
            evaluation,
            next_question: session.current_question().cloned(),
            position: session.position,
            completed,
        })
    }

    /// Aggregate view of a session's scores and answers.
    pub fn summary(&self, session_id: Uuid) -> Result<SessionSummary, EngineError> {
        Ok(summarize(&self.load(session_id)?))
    }

    fn load(&self, session_id: Uuid) -> Result<Session, EngineError> {
        self.store.get(session_id).map_err(|e| match e {
            StoreError::NotFound(id) => EngineError::NotFound(id),
            other => EngineError::Store(other),
        })
    }
}

/// Deterministic selection seed for a session: the low 64 bits of its UUID.
fn session_seed(id: Uuid) -> u64 {
    id.as_u128() as u64
}
