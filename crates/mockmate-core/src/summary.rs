//! Session summary aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerRecord, Session, SessionStatus};

/// Per-criterion averages across a session's recorded answers, each rounded
/// to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionAverages {
    pub relevance: f64,
    pub structure: f64,
    pub depth: f64,
    pub communication: f64,
    pub overall: f64,
}

/// The aggregated view of a session returned at session end (or any time
/// before).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub user_name: String,
    pub job_role: String,
    pub interview_type: String,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub total_questions: usize,
    pub answered: usize,
    /// `None` until at least one answer has been recorded.
    pub averages: Option<CriterionAverages>,
    /// Question/answer/evaluation tuples in answer order.
    pub answers: Vec<AnswerRecord>,
}

/// Build the summary for a session.
pub fn summarize(session: &Session) -> SessionSummary {
    SessionSummary {
        session_id: session.id,
        user_name: session.user_name.clone(),
        job_role: session.job_role.clone(),
        interview_type: session.interview_type.clone(),
        created_at: session.created_at,
        status: session.status,
        total_questions: session.total_questions(),
        answered: session.answers.len(),
        averages: criterion_averages(&session.answers),
        answers: session.answers.clone(),
    }
}

fn criterion_averages(answers: &[AnswerRecord]) -> Option<CriterionAverages> {
    if answers.is_empty() {
        return None;
    }

    let n = answers.len() as f64;
    let mean = |f: fn(&AnswerRecord) -> f64| {
        let sum: f64 = answers.iter().map(f).sum();
        (sum / n * 10.0).round() / 10.0
    };

    Some(CriterionAverages {
        relevance: mean(|a| a.evaluation.scores.relevance),
        structure: mean(|a| a.evaluation.scores.structure),
        depth: mean(|a| a.evaluation.scores.depth),
        communication: mean(|a| a.evaluation.scores.communication),
        overall: mean(|a| a.evaluation.overall),
    })
}
