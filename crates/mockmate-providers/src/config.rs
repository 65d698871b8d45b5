//! Service configuration and model factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mockmate_core::traits::TextModel;

use crate::gemini::GeminiModel;
use crate::openai::OpenAiModel;

/// Configuration for a single model backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in
/// logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// Top-level mockmate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockmateConfig {
    /// Model backend configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Which backend scores answers.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model identifier passed to the backend.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Questions per session.
    #[serde(default = "default_session_length")]
    pub session_length: usize,
    /// How many of those are behavioral (Round 1); the rest are DSA/CS.
    #[serde(default = "default_behavioral_questions")]
    pub behavioral_questions: usize,
    /// Question bank file.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Session store file.
    #[serde(default = "default_sessions_path")]
    pub sessions_path: PathBuf,
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}
fn default_session_length() -> usize {
    10
}
fn default_behavioral_questions() -> usize {
    5
}
fn default_bank_path() -> PathBuf {
    PathBuf::from("data/questions.json")
}
fn default_sessions_path() -> PathBuf {
    PathBuf::from("data/sessions.json")
}
fn default_port() -> u16 {
    8000
}

impl MockmateConfig {
    /// Reject values a session could not be built from. A zero-length
    /// session would start with no question to serve.
    pub fn validate(&self) -> Result<()> {
        if self.session_length == 0 {
            anyhow::bail!("session_length must be at least 1");
        }
        Ok(())
    }
}

impl Default for MockmateConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            session_length: default_session_length(),
            behavioral_questions: default_behavioral_questions(),
            bank_path: default_bank_path(),
            sessions_path: default_sessions_path(),
            port: default_port(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::OpenAI { api_key, base_url } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mockmate.toml` in the current directory
/// 2. `~/.config/mockmate/config.toml`
///
/// Environment variable overrides: `MOCKMATE_GEMINI_KEY`,
/// `MOCKMATE_OPENAI_KEY`.
pub fn load_config() -> Result<MockmateConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MockmateConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockmate.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MockmateConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MockmateConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("MOCKMATE_GEMINI_KEY") {
        config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Gemini { api_key, .. }) = config.providers.get_mut("gemini") {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("MOCKMATE_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockmate"))
}

/// Create a model backend instance from its configuration.
pub fn create_model(config: &ProviderConfig) -> Result<Box<dyn TextModel>> {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => {
            Ok(Box::new(GeminiModel::new(api_key, base_url.clone())))
        }
        ProviderConfig::OpenAI { api_key, base_url } => {
            Ok(Box::new(OpenAiModel::new(api_key, base_url.clone())))
        }
    }
}
