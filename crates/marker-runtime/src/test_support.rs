//! Scripted provider shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::providers::{
    ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError, TokenUsage,
};

/// Provider that answers every call with the same reply, or fails.
pub struct ScriptedProvider {
    reply: Option<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl ScriptedProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages and model of every call so far.
    pub fn seen(&self) -> Vec<(Vec<ChatMessage>, String)> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((messages, config.model.clone()));

        match &self.reply {
            Some(reply) => Ok(CompletionResponse {
                content: reply.clone(),
                usage: TokenUsage {
                    prompt_tokens: 120,
                    completion_tokens: 30,
                },
                model: config.model.clone(),
                stop_reason: Some("stop".to_string()),
            }),
            None => Err(ProviderError::HttpError("connection refused".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
