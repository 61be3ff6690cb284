//! Core data types for math-marker.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single problem with the answer we expect and the answer under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Identifier from the input table (kept as text)
    pub problem_index: String,

    /// The problem statement
    pub question: String,

    /// Known-correct answer
    pub correct_answer: String,

    /// Machine-generated answer being graded
    pub generated_answer: String,
}

impl ProblemRecord {
    /// Create a new problem record.
    pub fn new(
        problem_index: impl Into<String>,
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        generated_answer: impl Into<String>,
    ) -> Self {
        Self {
            problem_index: problem_index.into(),
            question: question.into(),
            correct_answer: correct_answer.into(),
            generated_answer: generated_answer.into(),
        }
    }
}

/// The verdict for one problem.
///
/// Serialized untagged so each variant keeps its own flat JSON shape:
/// numeric checks carry `comparison`, judged checks carry `explanation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evaluation {
    /// Both answers parsed as numbers and were compared directly.
    Numeric {
        /// Rendering of the comparison, e.g. "4 == 4"
        comparison: String,

        /// Whether the values are equal within tolerance
        result: bool,

        /// Always 1.0
        confidence: f64,
    },

    /// The answers were judged by the language model.
    Judged {
        /// Whether CORRECT votes outnumbered INCORRECT votes
        result: bool,

        /// Vote margin in [0, 1]
        confidence: f64,

        /// Full model reply, or the error text when the call failed
        explanation: String,
    },
}

impl Evaluation {
    /// Numeric verdict. Confidence is fixed at 1.0 whatever the outcome.
    pub fn numeric(comparison: impl Into<String>, result: bool) -> Self {
        Self::Numeric {
            comparison: comparison.into(),
            result,
            confidence: 1.0,
        }
    }

    /// Judged verdict.
    pub fn judged(result: bool, confidence: f64, explanation: impl Into<String>) -> Self {
        Self::Judged {
            result,
            confidence,
            explanation: explanation.into(),
        }
    }

    /// Verdict for a judge call that never produced a reply.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Judged {
            result: false,
            confidence: 0.0,
            explanation: format!("Error: {}", error),
        }
    }

    /// Whether the generated answer was accepted.
    pub fn is_correct(&self) -> bool {
        match self {
            Self::Numeric { result, .. } | Self::Judged { result, .. } => *result,
        }
    }

    /// Confidence attached to the verdict.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Numeric { confidence, .. } | Self::Judged { confidence, .. } => *confidence,
        }
    }

    /// True when the verdict came from the numeric fast path.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}

/// One processed problem, as persisted to the question/answers output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub problem_index: String,
    pub question: String,
    pub correct_answer: String,
    pub generated_answer: String,
    pub evaluation: Evaluation,
    pub timestamp: DateTime<Local>,
}

impl ResultRecord {
    /// Combine a problem with its evaluation, stamped now.
    pub fn new(problem: ProblemRecord, evaluation: Evaluation) -> Self {
        Self::at(problem, evaluation, Local::now())
    }

    /// Combine a problem with its evaluation at a fixed time.
    pub fn at(problem: ProblemRecord, evaluation: Evaluation, timestamp: DateTime<Local>) -> Self {
        Self {
            problem_index: problem.problem_index,
            question: problem.question,
            correct_answer: problem.correct_answer,
            generated_answer: problem.generated_answer,
            evaluation,
            timestamp,
        }
    }

    /// Project to the summary shape written to the evaluation output.
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            problem_index: self.problem_index.clone(),
            evaluation: self.evaluation.clone(),
        }
    }
}

/// Index plus evaluation, the entry shape of the evaluation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub problem_index: String,
    pub evaluation: Evaluation,
}
