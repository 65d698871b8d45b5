//! The `mockmate validate-bank` command.

use std::path::PathBuf;

use anyhow::Result;

use mockmate_core::bank::QuestionBank;
use mockmate_core::model::Round;
use mockmate_providers::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let path = match bank_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.bank_path,
    };

    let bank = QuestionBank::load(&path)?;
    println!(
        "Question bank: {} ({} questions: {} behavioral, {} dsa-fundamentals)",
        path.display(),
        bank.len(),
        bank.count_in_round(Round::Behavioral),
        bank.count_in_round(Round::DsaFundamentals),
    );

    let warnings = bank.validate();
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
