//! Token usage accounting across a grading run.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::providers::TokenUsage;

/// Accumulated LLM usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    /// Total tokens used
    pub total_tokens: u64,

    /// Prompt/input tokens
    pub prompt_tokens: u64,

    /// Completion/output tokens
    pub completion_tokens: u64,

    /// Calls that returned a reply
    pub llm_calls: u32,

    /// Calls that failed
    pub failed_calls: u32,
}

impl LlmUsage {
    /// Add token usage from a provider response.
    pub fn add(&mut self, usage: &TokenUsage) {
        self.prompt_tokens += u64::from(usage.prompt_tokens);
        self.completion_tokens += u64::from(usage.completion_tokens);
        self.total_tokens += u64::from(usage.total());
        self.llm_calls += 1;
    }
}

/// Shared usage counter. Cheap to update from `&self`.
#[derive(Debug, Default)]
pub struct UsageTracker {
    usage: Mutex<LlmUsage>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful call.
    pub fn record(&self, usage: &TokenUsage) {
        self.usage.lock().add(usage);
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        self.usage.lock().failed_calls += 1;
    }

    /// Snapshot of the totals so far.
    pub fn get_usage(&self) -> LlmUsage {
        self.usage.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_accumulates() {
        let tracker = UsageTracker::new();
        tracker.record(&TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 20,
        });
        tracker.record(&TokenUsage {
            prompt_tokens: 50,
            completion_tokens: 5,
        });
        tracker.record_failure();

        let usage = tracker.get_usage();
        assert_eq!(usage.prompt_tokens, 150);
        assert_eq!(usage.completion_tokens, 25);
        assert_eq!(usage.total_tokens, 175);
        assert_eq!(usage.llm_calls, 2);
        assert_eq!(usage.failed_calls, 1);
    }
}
