//! Core data model types for mockmate.
//!
//! These are the fundamental types the whole system uses to represent
//! interview questions, sessions, and answer evaluations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question bank partition. Round 1 is behavioral, Round 2 covers DSA and
/// CS fundamentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Round {
    Behavioral,
    DsaFundamentals,
}

impl Round {
    /// The round questions fall back to when this round's pool runs dry.
    pub fn other(self) -> Round {
        match self {
            Round::Behavioral => Round::DsaFundamentals,
            Round::DsaFundamentals => Round::Behavioral,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Behavioral => write!(f, "behavioral"),
            Round::DsaFundamentals => write!(f, "dsa-fundamentals"),
        }
    }
}

impl FromStr for Round {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "behavioral" => Ok(Round::Behavioral),
            "dsa-fundamentals" | "dsa" | "cs-fundamentals" => Ok(Round::DsaFundamentals),
            other => Err(format!("unknown round: {other}")),
        }
    }
}

/// A single interview question. Loaded from the bank file at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Which round this question belongs to.
    pub round: Round,
    /// The prompt shown to the candidate.
    pub text: String,
    /// Difficulty label (e.g. "easy", "medium").
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Topic tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Points a strong answer would touch on; fed into the evaluation prompt.
    #[serde(default)]
    pub sample_good_points: Vec<String>,
}

/// Per-criterion scores on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub relevance: f64,
    pub structure: f64,
    pub depth: f64,
    pub communication: f64,
}

impl Scores {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    /// Mean of the four criteria, rounded to one decimal place.
    pub fn overall(&self) -> f64 {
        let mean = (self.relevance + self.structure + self.depth + self.communication) / 4.0;
        (mean * 10.0).round() / 10.0
    }

    /// Whether every criterion lies within the 0-10 scale.
    pub fn in_range(&self) -> bool {
        [self.relevance, self.structure, self.depth, self.communication]
            .iter()
            .all(|s| (Self::MIN..=Self::MAX).contains(s) && s.is_finite())
    }
}

/// The structured scoring and feedback result for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub scores: Scores,
    /// Derived from `scores`; stored so summaries never recompute it.
    pub overall: f64,
    /// Short feedback bullets.
    #[serde(default)]
    pub feedback: Vec<String>,
    /// A short improved answer the candidate can learn from.
    #[serde(default)]
    pub suggested_answer: String,
}

impl Evaluation {
    pub fn new(scores: Scores, feedback: Vec<String>, suggested_answer: String) -> Self {
        Self {
            overall: scores.overall(),
            scores,
            feedback,
            suggested_answer,
        }
    }
}

/// One answered question: the answer text plus its evaluation. Immutable
/// once recorded; owned by its parent [`Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub question_text: String,
    pub answer_text: String,
    pub evaluation: Evaluation,
    pub answered_at: DateTime<Utc>,
}

/// Session lifecycle state. There is no backward transition and no
/// cancellation; an abandoned session simply stays in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

/// One complete interview run bound to a fixed ordered set of questions.
///
/// Invariants: `answers.len() == position` at all times, and
/// `position <= questions.len()`. `position == questions.len()` means the
/// session is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_name: String,
    pub job_role: String,
    pub interview_type: String,
    pub created_at: DateTime<Utc>,
    /// Assigned at creation; fixed length for the life of the session.
    pub questions: Vec<Question>,
    /// Index of the next question awaiting an answer.
    pub position: usize,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    pub status: SessionStatus,
}

impl Session {
    /// The question the candidate is expected to answer next, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
