//! # marker-cli
//!
//! Grades a table of generated answers to math problems.
//!
//! Startup problems (missing config, missing key, missing input table)
//! abort the run before any row is touched. Once rows are flowing, every
//! failure stays confined to its row.

pub mod config;
pub mod input;
pub mod logging;
pub mod output;
pub mod processor;

use anyhow::{Context, Result};
use std::path::PathBuf;

use marker_runtime::{CompletionConfig, Evaluator, LlmUsage, MultiMethodJudge, ProviderRegistry};

pub use config::{ConfigError, MarkerConfig};
pub use input::{InputError, ProblemReader, RowError};
pub use output::{OutputError, ResultStore};
pub use processor::{RowProcessor, RunSummary};

/// Where a run reads its inputs from.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub input_path: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub usage: LlmUsage,
}

/// Build the evaluator described by `config`.
pub fn build_evaluator(config: &MarkerConfig) -> Result<Evaluator> {
    let document = config.document();
    let registry = ProviderRegistry::with_defaults();

    registry
        .validate(&config.provider, document)
        .with_context(|| format!("Invalid settings for provider '{}'", config.provider))?;
    let provider = registry
        .create(&config.provider, document)
        .with_context(|| format!("Failed to create provider '{}'", config.provider))?;

    let completion =
        CompletionConfig::from_config(document).context("Invalid completion settings")?;

    tracing::info!(
        provider = provider.name(),
        model = %completion.model,
        base_url = %config.base_url,
        vote_counting = ?config.vote_counting,
        "Judge configured"
    );

    let judge = MultiMethodJudge::new(provider, completion).with_vote_counting(config.vote_counting);
    Ok(Evaluator::new(judge))
}

/// Run a full grading pass.
pub async fn run(options: &RunOptions) -> Result<RunReport> {
    let config = MarkerConfig::from_file(&options.config_path)
        .with_context(|| format!("Failed to load config {}", options.config_path.display()))?;

    let evaluator = build_evaluator(&config)?;

    let problems = ProblemReader::open(&options.input_path)
        .with_context(|| format!("Failed to open input {}", options.input_path.display()))?;

    let store = ResultStore::create(&config.question_answers_output, &config.evaluation_output)
        .context("Failed to initialize output files")?;

    let mut processor = RowProcessor::new(&evaluator, store);
    let summary = processor.process(problems).await;
    let usage = evaluator.usage();

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        correct = summary.correct,
        numeric = summary.numeric,
        judged = summary.judged,
        llm_calls = usage.llm_calls,
        failed_calls = usage.failed_calls,
        total_tokens = usage.total_tokens,
        "Run complete"
    );

    Ok(RunReport { summary, usage })
}
