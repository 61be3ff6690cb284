//! Multi-method LLM judge.
//!
//! Sends one request per problem asking the model to check the generated
//! answer under five proof methods, then tallies the CORRECT/INCORRECT
//! votes in the reply. Provider failures become a failed evaluation for
//! that problem instead of an error.

use std::sync::Arc;

use marker_core::{Evaluation, VoteCounting, VoteTally};

use crate::prompts::{evaluation_prompt, SYSTEM_PROMPT};
use crate::providers::{ChatMessage, CompletionConfig, LlmProvider};
use crate::usage::{LlmUsage, UsageTracker};

/// LLM-backed judge applying five proof methods in one request.
pub struct MultiMethodJudge {
    provider: Arc<dyn LlmProvider>,
    config: CompletionConfig,
    counting: VoteCounting,
    usage: UsageTracker,
}

impl MultiMethodJudge {
    /// Create a judge calling `provider` with the model in `config`.
    pub fn new(provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        Self {
            provider,
            config,
            counting: VoteCounting::default(),
            usage: UsageTracker::new(),
        }
    }

    /// Choose how vote tokens are counted.
    pub fn with_vote_counting(mut self, counting: VoteCounting) -> Self {
        self.counting = counting;
        self
    }

    /// Token usage so far.
    pub fn usage(&self) -> LlmUsage {
        self.usage.get_usage()
    }

    /// Judge one answer. Exactly one provider call.
    pub async fn judge(
        &self,
        question: &str,
        correct_answer: &str,
        generated_answer: &str,
    ) -> Evaluation {
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(evaluation_prompt(question, correct_answer, generated_answer)),
        ];

        match self.provider.complete(messages, &self.config).await {
            Ok(response) => {
                self.usage.record(&response.usage);
                let evaluation = verdict(response.content.trim(), self.counting);
                tracing::debug!(
                    provider = self.provider.name(),
                    model = %response.model,
                    tokens = response.usage.total(),
                    result = evaluation.is_correct(),
                    confidence = evaluation.confidence(),
                    "Judge replied"
                );
                evaluation
            }
            Err(e) => {
                self.usage.record_failure();
                tracing::error!(provider = self.provider.name(), error = %e, "Error in evaluation");
                Evaluation::failed(e)
            }
        }
    }
}

/// Reduce a judge reply to an evaluation.
pub fn verdict(reply: &str, counting: VoteCounting) -> Evaluation {
    let tally = VoteTally::count(reply, counting);
    if tally.total() == 0 {
        tracing::warn!("Judge reply contained no CORRECT/INCORRECT votes");
    }
    Evaluation::judged(tally.result(), tally.confidence(), reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedProvider;

    const REPLY: &str = "\
1. Numerical Analysis: sqrt(2) has no finite decimal expansion. CORRECT
2. Logical Reasoning: the argument holds. CORRECT
3. Axiomatic Proof: follows from the fundamental theorem of arithmetic. CORRECT
4. Contradiction Proof: assuming p/q in lowest terms gives a contradiction. CORRECT
5. Contrapositive Proof: not applicable as stated. INCORRECT
";

    fn judge_with(provider: Arc<ScriptedProvider>) -> MultiMethodJudge {
        MultiMethodJudge::new(provider, CompletionConfig::new("judge-model"))
    }

    #[tokio::test]
    async fn test_single_call_with_system_and_user_messages() {
        let provider = Arc::new(ScriptedProvider::replying(REPLY));
        let judge = judge_with(provider.clone());

        judge
            .judge("Is the square root of 2 irrational?", "Yes", "Yes, by contradiction...")
            .await;

        assert_eq!(provider.calls(), 1);
        let seen = provider.seen();
        let (messages, model) = &seen[0];
        assert_eq!(model, "judge-model");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("Contrapositive Proof"));
        assert!(messages[1].content.contains("Yes, by contradiction..."));
    }

    #[tokio::test]
    async fn test_votes_tallied_whole_token() {
        let judge = judge_with(Arc::new(ScriptedProvider::replying(REPLY)));
        let evaluation = judge.judge("q", "Yes", "Yes").await;

        match evaluation {
            Evaluation::Judged {
                result,
                confidence,
                explanation,
            } => {
                assert!(result);
                assert!((confidence - 0.8).abs() < 1e-12);
                // Reply is stored trimmed
                assert_eq!(explanation, REPLY.trim());
            }
            other => panic!("Expected judged evaluation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_substring_counting_mode() {
        let judge = judge_with(Arc::new(ScriptedProvider::replying("INCORRECT INCORRECT CORRECT")))
            .with_vote_counting(VoteCounting::Substring);

        // 3 CORRECT substrings vs 2 INCORRECT
        let evaluation = judge.judge("q", "a", "b").await;
        assert!(evaluation.is_correct());
        assert!((evaluation.confidence() - 0.6).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_reply_without_votes() {
        let judge = judge_with(Arc::new(ScriptedProvider::replying("I am not sure.")));
        let evaluation = judge.judge("q", "a", "b").await;

        assert!(!evaluation.is_correct());
        assert_eq!(evaluation.confidence(), 0.0);
    }

    #[tokio::test]
    async fn test_transport_error_becomes_failed_evaluation() {
        let provider = Arc::new(ScriptedProvider::failing());
        let judge = judge_with(provider.clone());

        let evaluation = judge.judge("q", "a", "b").await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(
            evaluation,
            Evaluation::judged(false, 0.0, "Error: HTTP request failed: connection refused")
        );
        assert_eq!(judge.usage().failed_calls, 1);
        assert_eq!(judge.usage().llm_calls, 0);
    }

    #[tokio::test]
    async fn test_usage_accumulates_across_calls() {
        let judge = judge_with(Arc::new(ScriptedProvider::replying(REPLY)));

        judge.judge("q", "a", "b").await;
        judge.judge("q", "a", "b").await;

        let usage = judge.usage();
        assert_eq!(usage.llm_calls, 2);
        assert_eq!(usage.total_tokens, 300);
    }
}
