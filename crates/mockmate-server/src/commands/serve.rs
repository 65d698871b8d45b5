//! The `mockmate serve` command.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use mockmate_core::bank::QuestionBank;
use mockmate_core::engine::{SessionEngine, SessionSettings};
use mockmate_core::evaluator::AnswerEvaluator;
use mockmate_core::store::FileSessionStore;
use mockmate_providers::{create_model, load_config_from};

use crate::routes::build_router;
use crate::state::AppState;

pub async fn execute(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    bank_path: Option<PathBuf>,
    sessions_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bank) = bank_path {
        config.bank_path = bank;
    }
    if let Some(sessions) = sessions_path {
        config.sessions_path = sessions;
    }
    config.validate()?;

    // An unreadable or empty bank is fatal; the server never starts without
    // questions to serve.
    let bank = QuestionBank::load(&config.bank_path)?;
    for warning in bank.validate() {
        tracing::warn!(
            question_id = warning.question_id.as_deref().unwrap_or("-"),
            "question bank: {}",
            warning.message
        );
    }
    info!(
        questions = bank.len(),
        bank = %config.bank_path.display(),
        "question bank loaded"
    );

    let provider_config = config.providers.get(&config.default_provider).with_context(|| {
        format!(
            "no provider configured under name '{}'; add it to mockmate.toml or set the \
             MOCKMATE_*_KEY environment variable",
            config.default_provider
        )
    })?;
    let model = create_model(provider_config)?;
    info!(
        provider = %config.default_provider,
        model = %config.default_model,
        "evaluator backend ready"
    );

    let engine = SessionEngine::new(
        bank,
        AnswerEvaluator::new(Arc::from(model), &config.default_model),
        Arc::new(FileSessionStore::new(&config.sessions_path)),
        SessionSettings {
            total_questions: config.session_length,
            behavioral_count: config.behavioral_questions,
        },
    );

    let app = build_router(AppState::new(engine));
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
