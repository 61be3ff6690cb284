//! Answer evaluator: numeric fast path first, judge second.

use marker_core::{compare_numeric, Evaluation, ProblemRecord};

use crate::judge::MultiMethodJudge;
use crate::usage::LlmUsage;

/// Evaluates generated answers against the expected ones.
///
/// Built once at startup and passed to whatever iterates the problems.
pub struct Evaluator {
    judge: MultiMethodJudge,
}

impl Evaluator {
    /// Create an evaluator that falls back to `judge`.
    pub fn new(judge: MultiMethodJudge) -> Self {
        Self { judge }
    }

    /// Evaluate one answer.
    ///
    /// When both answers are numeric literals the judge is never called.
    pub async fn evaluate(
        &self,
        question: &str,
        correct_answer: &str,
        generated_answer: &str,
    ) -> Evaluation {
        if let Some(evaluation) = compare_numeric(generated_answer, correct_answer) {
            return evaluation;
        }

        self.judge
            .judge(question, correct_answer, generated_answer)
            .await
    }

    /// Evaluate a problem record.
    pub async fn evaluate_problem(&self, problem: &ProblemRecord) -> Evaluation {
        self.evaluate(
            &problem.question,
            &problem.correct_answer,
            &problem.generated_answer,
        )
        .await
    }

    /// Token usage of the judge so far.
    pub fn usage(&self) -> LlmUsage {
        self.judge.usage()
    }
}
