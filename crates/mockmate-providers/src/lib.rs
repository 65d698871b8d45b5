//! mockmate-providers — text-model backend integrations.
//!
//! Implements the `TextModel` trait for Gemini and OpenAI-compatible APIs,
//! plus a scripted mock for tests, and carries the service configuration.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use config::{create_model, load_config, load_config_from, MockmateConfig, ProviderConfig};
pub use error::ModelError;
