//! LLM Provider abstractions for marker-runtime.
//!
//! This module defines the trait for LLM providers and includes an
//! implementation for OpenAI-compatible chat completion endpoints.
//!
//! API keys are wrapped in [`ApiCredential`] so they never reach the logs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;

mod factory;
pub mod secrets;

#[cfg(feature = "openai")]
mod openai;

pub use factory::{ProviderFactory, ProviderRegistry};
pub use secrets::ApiCredential;

#[cfg(feature = "openai")]
pub use openai::{OpenAiProvider, OpenAiProviderFactory};

/// Errors from LLM providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Configuration for a completion request.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Model to use
    pub model: String,

    /// Maximum tokens to generate (provider default when unset)
    pub max_tokens: Option<u32>,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl CompletionConfig {
    /// Create a config for the given model with default limits.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Read `model`, `max_tokens`, `temperature` and `timeout` from JSON.
    ///
    /// `model` is required. `timeout` is a human-readable duration such as
    /// `"30s"` or `"2m"`.
    pub fn from_config(config: &JsonValue) -> Result<Self, ProviderError> {
        let model = config["model"]
            .as_str()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ProviderError::NotConfigured("'model' is required".to_string()))?;

        let mut completion = Self::new(model);

        if let Some(max_tokens) = config["max_tokens"].as_u64() {
            completion.max_tokens = Some(u32::try_from(max_tokens).map_err(|_| {
                ProviderError::NotConfigured(format!("max_tokens out of range: {}", max_tokens))
            })?);
        }

        if let Some(temperature) = config["temperature"].as_f64() {
            completion.temperature = Some(temperature as f32);
        }

        if let Some(timeout) = config["timeout"].as_str() {
            completion.timeout = humantime::parse_duration(timeout).map_err(|e| {
                ProviderError::NotConfigured(format!("invalid timeout '{}': {}", timeout, e))
            })?;
        }

        Ok(completion)
    }
}

/// A chat message for LLM completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response from an LLM completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,

    /// Token usage
    pub usage: TokenUsage,

    /// Model used
    pub model: String,

    /// Stop reason
    pub stop_reason: Option<String>,
}

/// Token usage from a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Provider abstraction allows swapping LLM backends.
///
/// The judge is the only caller. The numeric fast path never reaches it.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Execute a chat completion.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Get provider name for logs.
    fn name(&self) -> &str;
}
