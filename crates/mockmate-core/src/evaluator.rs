//! The evaluator adapter: turns (question, answer) into an [`Evaluation`].
//!
//! Builds a deterministic prompt, asks the configured [`TextModel`] for a
//! single JSON object, and validates the reply against a strict schema. Any
//! failure on that path (transport, auth, non-JSON output, missing or
//! out-of-range score) collapses into the neutral fallback evaluation, so
//! `evaluate` never fails and the caller always gets a usable result. The
//! fallback's feedback bullet is the only caller-visible trace of an
//! evaluator outage.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Deserialize;

use crate::model::{Evaluation, Question, Scores};
use crate::traits::{extract_json_block, CompletionRequest, TextModel};

/// Sub-score used for every criterion when the evaluator is unavailable.
pub const NEUTRAL_SCORE: f64 = 5.0;

const MAX_TOKENS: u32 = 1024;
// Deterministic scoring; sampling noise would make re-grading drift.
const TEMPERATURE: f64 = 0.0;

const SYSTEM_PROMPT: &str = "You are a rigorous interview coach. You score candidate answers \
against a fixed rubric and respond with ONLY a single valid JSON object. No prose, no markdown.";

/// Wraps a text-model backend with prompt construction, strict reply
/// parsing, and the neutral fallback.
pub struct AnswerEvaluator {
    model: Arc<dyn TextModel>,
    model_id: String,
}

/// Strict schema for the model's reply. Parsed with serde rather than ad hoc
/// field access so a missing or mistyped field is a parse error, not a
/// silent default.
#[derive(Debug, Deserialize)]
struct RawEvaluation {
    scores: RawScores,
    #[serde(default)]
    feedback: Vec<String>,
    #[serde(default)]
    suggested_answer: String,
}

#[derive(Debug, Deserialize)]
struct RawScores {
    relevance: f64,
    structure: f64,
    depth: f64,
    communication: f64,
}

impl AnswerEvaluator {
    pub fn new(model: Arc<dyn TextModel>, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
        }
    }

    /// Score one answer. Always returns a well-formed evaluation: failures
    /// are folded into the neutral fallback. Single attempt, no retries.
    pub async fn evaluate(&self, question: &Question, answer: &str, job_role: &str) -> Evaluation {
        let request = CompletionRequest {
            model: self.model_id.clone(),
            prompt: build_prompt(question, answer, job_role),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = match self.model.complete(&request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(model = %self.model_id, error = %e, "evaluator call failed");
                return fallback_evaluation(&format!("evaluator request failed: {e}"));
            }
        };

        match parse_reply(&response.content) {
            Ok(evaluation) => evaluation,
            Err(reason) => {
                tracing::warn!(model = %self.model_id, %reason, "evaluator reply rejected");
                fallback_evaluation(&reason)
            }
        }
    }
}

/// Deterministic prompt embedding the rubric, the question, and the verbatim
/// answer.
fn build_prompt(question: &Question, answer: &str, job_role: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are evaluating a candidate for the role: {job_role}.\n"
    );
    let _ = writeln!(prompt, "Question:\n{}\n", question.text);
    let _ = writeln!(prompt, "Round: {}", question.round);
    if let Some(difficulty) = &question.difficulty {
        let _ = writeln!(prompt, "Difficulty: {difficulty}");
    }
    if !question.sample_good_points.is_empty() {
        let _ = writeln!(prompt, "Points a strong answer would cover:");
        for point in &question.sample_good_points {
            let _ = writeln!(prompt, "- {point}");
        }
    }
    let _ = writeln!(prompt, "\nCandidate answer:\n{answer}\n");
    let _ = writeln!(
        prompt,
        "Scoring rubric, each criterion 0-10:\n\
         - relevance: addresses the question and its key points\n\
         - structure: clear organization, concise delivery, logical flow\n\
         - depth: technical depth for technical questions; specificity and impact for behavioral\n\
         - communication: clarity of language, no filler, confident tone\n\n\
         Return ONLY valid JSON in this exact shape, no extra text:\n\
         {{\n\
           \"scores\": {{\"relevance\": 0-10, \"structure\": 0-10, \"depth\": 0-10, \"communication\": 0-10}},\n\
           \"feedback\": [\"short bullet on what went well or what to improve\"],\n\
           \"suggested_answer\": \"a short improved answer (2-5 sentences)\"\n\
         }}"
    );
    prompt
}

/// Parse and validate a model reply. The error string becomes the fallback
/// reason.
fn parse_reply(raw: &str) -> Result<Evaluation, String> {
    let cleaned = extract_json_block(raw);
    let parsed: RawEvaluation = serde_json::from_str(&cleaned)
        .map_err(|e| format!("evaluator returned invalid JSON: {e}"))?;

    let scores = Scores {
        relevance: parsed.scores.relevance,
        structure: parsed.scores.structure,
        depth: parsed.scores.depth,
        communication: parsed.scores.communication,
    };
    if !scores.in_range() {
        return Err(format!(
            "evaluator returned scores outside 0-10: {scores:?}"
        ));
    }

    Ok(Evaluation::new(
        scores,
        parsed.feedback,
        parsed.suggested_answer,
    ))
}

/// The neutral evaluation recorded when scoring is unavailable.
fn fallback_evaluation(reason: &str) -> Evaluation {
    let scores = Scores {
        relevance: NEUTRAL_SCORE,
        structure: NEUTRAL_SCORE,
        depth: NEUTRAL_SCORE,
        communication: NEUTRAL_SCORE,
    };
    Evaluation::new(
        scores,
        vec![format!(
            "Automatic scoring was temporarily unavailable ({reason}); neutral scores were \
             recorded. Check evaluator credentials and connectivity."
        )],
        String::new(),
    )
}
