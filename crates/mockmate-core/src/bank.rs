//! Question bank loading, validation, and deterministic selection.
//!
//! The bank is a JSON array of question records loaded once at startup. A
//! missing or unparseable bank is fatal: the server never starts with an
//! empty bank.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::model::{Question, Round};

/// The static, ordered collection of interview questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load the bank from a JSON file. Fails on missing file, parse errors,
    /// or an empty bank.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read question bank: {}", path.display()))?;
        let questions: Vec<Question> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse question bank: {}", path.display()))?;
        if questions.is_empty() {
            anyhow::bail!("question bank is empty: {}", path.display());
        }
        Ok(Self { questions })
    }

    /// Build a bank from in-memory questions (used by tests and `init`).
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions tagged with `round`.
    pub fn count_in_round(&self, round: Round) -> usize {
        self.questions.iter().filter(|q| q.round == round).count()
    }

    /// Select up to `count` questions from `round`, skipping ids in
    /// `exclude`.
    ///
    /// Order is deterministic for a given `seed`: the round's unused pool is
    /// shuffled with a seeded RNG and the first `count` taken. When the pool
    /// is smaller than `count`, the remainder is drawn from the *other*
    /// round's unused pool, shuffled by the same RNG, so a session is filled
    /// whenever the combined bank allows it. Returns fewer than `count` only
    /// when both pools are exhausted.
    pub fn select(
        &self,
        round: Round,
        count: usize,
        exclude: &HashSet<String>,
        seed: u64,
    ) -> Vec<Question> {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut pool: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.round == round && !exclude.contains(&q.id))
            .collect();
        pool.shuffle(&mut rng);

        let mut picked: Vec<Question> = pool.into_iter().take(count).cloned().collect();

        if picked.len() < count {
            let shortfall = count - picked.len();
            tracing::warn!(
                round = %round,
                shortfall,
                "round pool exhausted, filling from {}",
                round.other()
            );
            let taken: HashSet<&str> = picked.iter().map(|q| q.id.as_str()).collect();
            let mut fallback: Vec<&Question> = self
                .questions
                .iter()
                .filter(|q| {
                    q.round == round.other()
                        && !exclude.contains(&q.id)
                        && !taken.contains(q.id.as_str())
                })
                .collect();
            fallback.shuffle(&mut rng);
            picked.extend(fallback.into_iter().take(shortfall).cloned());
        }

        picked
    }

    /// Validate the bank for common authoring mistakes.
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let mut seen_ids = HashSet::new();
        for q in &self.questions {
            if !seen_ids.insert(&q.id) {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: format!("duplicate question ID: {}", q.id),
                });
            }
        }

        for q in &self.questions {
            if q.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: "question text is empty".into(),
                });
            }
        }

        for round in [Round::Behavioral, Round::DsaFundamentals] {
            if self.count_in_round(round) == 0 {
                warnings.push(ValidationWarning {
                    question_id: None,
                    message: format!("no questions in round: {round}"),
                });
            }
        }

        warnings
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, round: Round) -> Question {
        Question {
            id: id.into(),
            round,
            text: format!("question {id}"),
            difficulty: None,
            tags: vec![],
            sample_good_points: vec![],
        }
    }

    fn bank(behavioral: usize, dsa: usize) -> QuestionBank {
        let mut questions = Vec::new();
        for i in 0..behavioral {
            questions.push(question(&format!("beh-{i:03}"), Round::Behavioral));
        }
        for i in 0..dsa {
            questions.push(question(&format!("dsa-{i:03}"), Round::DsaFundamentals));
        }
        QuestionBank::from_questions(questions)
    }

    #[test]
    fn select_takes_count_from_round() {
        let bank = bank(8, 8);
        let picked = bank.select(Round::Behavioral, 5, &HashSet::new(), 42);
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|q| q.round == Round::Behavioral));
    }

    #[test]
    fn select_is_deterministic_per_seed() {
        let bank = bank(8, 8);
        let a = bank.select(Round::Behavioral, 5, &HashSet::new(), 42);
        let b = bank.select(Round::Behavioral, 5, &HashSet::new(), 42);
        let ids = |qs: &[Question]| qs.iter().map(|q| q.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));

        let c = bank.select(Round::Behavioral, 5, &HashSet::new(), 43);
        // Different seed orders an 8-question pool differently.
        assert_ne!(ids(&a), ids(&c));
    }

    #[test]
    fn select_respects_exclusions() {
        let bank = bank(8, 0);
        let first = bank.select(Round::Behavioral, 4, &HashSet::new(), 7);
        let exclude: HashSet<String> = first.iter().map(|q| q.id.clone()).collect();
        let second = bank.select(Round::Behavioral, 4, &exclude, 7);
        assert_eq!(second.len(), 4);
        for q in &second {
            assert!(!exclude.contains(&q.id));
        }
    }

    #[test]
    fn select_falls_back_to_other_round() {
        let bank = bank(3, 8);
        let picked = bank.select(Round::Behavioral, 5, &HashSet::new(), 1);
        assert_eq!(picked.len(), 5);
        let behavioral = picked
            .iter()
            .filter(|q| q.round == Round::Behavioral)
            .count();
        assert_eq!(behavioral, 3);
        assert_eq!(picked.len() - behavioral, 2);
    }

    #[test]
    fn select_returns_short_when_bank_exhausted() {
        let bank = bank(2, 1);
        let picked = bank.select(Round::Behavioral, 5, &HashSet::new(), 1);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn select_never_duplicates_within_one_call() {
        let bank = bank(3, 3);
        let picked = bank.select(Round::Behavioral, 6, &HashSet::new(), 9);
        let mut ids: Vec<_> = picked.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = QuestionBank::load(Path::new("/nonexistent/questions.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_rejects_empty_bank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "[]").unwrap();
        let err = QuestionBank::load(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(QuestionBank::load(&path).is_err());
    }

    #[test]
    fn load_parses_bank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "beh-001", "round": "behavioral", "text": "Tell me about a conflict."},
                {"id": "dsa-001", "round": "dsa-fundamentals", "text": "Explain hashing.",
                 "difficulty": "easy", "tags": ["hashing"]}
            ]"#,
        )
        .unwrap();

        let bank = QuestionBank::load(&path).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.count_in_round(Round::Behavioral), 1);
        assert_eq!(bank.count_in_round(Round::DsaFundamentals), 1);
    }

    #[test]
    fn validate_flags_duplicates_and_empty_text() {
        let bank = QuestionBank::from_questions(vec![
            question("same", Round::Behavioral),
            question("same", Round::Behavioral),
            Question {
                text: "   ".into(),
                ..question("blank", Round::DsaFundamentals)
            },
        ]);
        let warnings = bank.validate();
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("empty")));
    }

    #[test]
    fn validate_flags_missing_round() {
        let bank = bank(3, 0);
        let warnings = bank.validate();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("dsa-fundamentals")));
    }
}
