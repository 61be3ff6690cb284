//! Row processing loop.
//!
//! Rows are evaluated one at a time in input order. A row that cannot be
//! read or written is logged and skipped; nothing that happens inside the
//! loop stops the run.

use serde::Serialize;

use marker_core::{ProblemRecord, ResultRecord};
use marker_runtime::Evaluator;

use crate::input::RowError;
use crate::output::{OutputError, ResultStore};

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows evaluated and written
    pub processed: usize,

    /// Rows skipped because of an error
    pub skipped: usize,

    /// Processed rows graded correct
    pub correct: usize,

    /// Processed rows settled by the numeric fast path
    pub numeric: usize,

    /// Processed rows sent to the judge
    pub judged: usize,
}

/// Evaluates rows and persists each result as soon as it exists.
pub struct RowProcessor<'a> {
    evaluator: &'a Evaluator,
    store: ResultStore,
    summary: RunSummary,
}

impl<'a> RowProcessor<'a> {
    pub fn new(evaluator: &'a Evaluator, store: ResultStore) -> Self {
        Self {
            evaluator,
            store,
            summary: RunSummary::default(),
        }
    }

    /// Process every row, isolating failures to the row they occur in.
    pub async fn process<I>(&mut self, rows: I) -> RunSummary
    where
        I: IntoIterator<Item = Result<ProblemRecord, RowError>>,
    {
        for row in rows {
            let problem = match row {
                Ok(problem) => problem,
                Err(e) => {
                    tracing::error!(error = %e, "Skipping row");
                    self.summary.skipped += 1;
                    continue;
                }
            };

            let problem_index = problem.problem_index.clone();
            let outcome = self.process_problem(problem).await.map(|_| ());
            if let Err(e) = outcome {
                tracing::error!(problem_index = %problem_index, error = %e, "Error processing row");
                self.summary.skipped += 1;
            }
        }

        self.summary
    }

    /// Evaluate one problem and write it out.
    pub async fn process_problem(
        &mut self,
        problem: ProblemRecord,
    ) -> Result<&ResultRecord, OutputError> {
        tracing::info!(problem_index = %problem.problem_index, "Processing problem");
        tracing::info!("Question: {}", problem.question);
        tracing::info!("Correct Answer: {}", problem.correct_answer);
        tracing::info!("Generated Answer: {}", problem.generated_answer);

        let evaluation = self.evaluator.evaluate_problem(&problem).await;
        let record = self.store.push(ResultRecord::new(problem, evaluation))?;

        self.summary.processed += 1;
        if record.evaluation.is_correct() {
            self.summary.correct += 1;
        }
        if record.evaluation.is_numeric() {
            self.summary.numeric += 1;
        } else {
            self.summary.judged += 1;
        }

        tracing::info!(
            problem_index = %record.problem_index,
            result = record.evaluation.is_correct(),
            confidence = record.evaluation.confidence(),
            "Completed processing problem"
        );
        Ok(record)
    }

    /// Give back the result store.
    pub fn into_store(self) -> ResultStore {
        self.store
    }
}
