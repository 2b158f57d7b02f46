//! LLM provider abstraction for recipe generation.
//!
//! The planner only ever needs "send this prompt, give me the text back", so
//! providers expose a single `complete` call. Tests swap in [`FakeProvider`].

mod config;
mod fake;
mod openai;

pub use config::{ConfigError, OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, TEMPERATURE};
pub use fake::{sample_week_json, FakeProvider};
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl From<ConfigError> for LlmError {
    fn from(err: ConfigError) -> Self {
        LlmError::NotConfigured(err.to_string())
    }
}

/// Trait for LLM providers.
///
/// Implementations are stateless and thread-safe. One call is one outbound
/// request; retrying is the caller's decision.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get its text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Build the provider selected by the environment.
///
/// - `BEET_LLM_PROVIDER`: "openai" (default) | "fake"
///
/// See [`OpenAiConfig::from_env`] for the OpenAI variables.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("BEET_LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());

    match provider.as_str() {
        "openai" => {
            let config = OpenAiConfig::from_env()?;
            Ok(Box::new(OpenAiProvider::new(config)))
        }
        "fake" => Ok(Box::new(FakeProvider::with_sample_week())),
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
