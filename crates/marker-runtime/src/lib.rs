//! # marker-runtime
//!
//! LLM-assisted evaluation for math-marker.
//!
//! Answers that are not plain numbers cannot be compared directly. This
//! crate sends them to a language model that checks the generated answer
//! under five proof methods and votes CORRECT or INCORRECT under each.
//!
//! ## Example
//!
//! ```rust,ignore
//! use marker_runtime::{CompletionConfig, Evaluator, MultiMethodJudge, ProviderRegistry};
//!
//! let provider = ProviderRegistry::with_defaults().create("openai", &config)?;
//! let judge = MultiMethodJudge::new(provider, CompletionConfig::from_config(&config)?);
//! let evaluator = Evaluator::new(judge);
//!
//! let evaluation = evaluator
//!     .evaluate("Is the square root of 2 irrational?", "Yes", "Yes, by contradiction...")
//!     .await;
//! ```

pub mod evaluator;
pub mod judge;
pub mod prompts;
pub mod providers;
pub mod usage;

#[cfg(test)]
mod test_support;

pub use evaluator::Evaluator;
pub use judge::{verdict, MultiMethodJudge};
pub use providers::{
    ApiCredential, ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError,
    ProviderFactory, ProviderRegistry, TokenUsage,
};
pub use usage::{LlmUsage, UsageTracker};

#[cfg(feature = "openai")]
pub use providers::{OpenAiProvider, OpenAiProviderFactory};
