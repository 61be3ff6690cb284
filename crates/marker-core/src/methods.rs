//! The five proof methods the judge is asked to apply.

use serde::{Deserialize, Serialize};

/// A proof strategy applied by the judge. Each ends with a CORRECT or
/// INCORRECT vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofMethod {
    NumericalAnalysis,
    LogicalReasoning,
    AxiomaticProof,
    ContradictionProof,
    ContrapositiveProof,
}

impl ProofMethod {
    /// All methods, in the order they appear in the prompt.
    pub const ALL: [ProofMethod; 5] = [
        ProofMethod::NumericalAnalysis,
        ProofMethod::LogicalReasoning,
        ProofMethod::AxiomaticProof,
        ProofMethod::ContradictionProof,
        ProofMethod::ContrapositiveProof,
    ];

    /// Display name used in the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            ProofMethod::NumericalAnalysis => "Numerical Analysis",
            ProofMethod::LogicalReasoning => "Logical Reasoning",
            ProofMethod::AxiomaticProof => "Axiomatic Proof",
            ProofMethod::ContradictionProof => "Contradiction Proof",
            ProofMethod::ContrapositiveProof => "Contrapositive Proof",
        }
    }

    /// What the judge should do under this method.
    pub fn instruction(&self) -> &'static str {
        match self {
            ProofMethod::NumericalAnalysis => {
                "Using numerical calculation and examples, is the generated answer correct?"
            }
            ProofMethod::LogicalReasoning => {
                "Using logical reasoning and step-by-step deduction, is the generated answer correct?"
            }
            ProofMethod::AxiomaticProof => {
                "Using mathematical axioms and definitions, is the generated answer correct?"
            }
            ProofMethod::ContradictionProof => {
                "Using proof by contradiction, assuming the opposite of the generated answer, is the generated answer correct?"
            }
            ProofMethod::ContrapositiveProof => {
                "Using contrapositive logic, is the generated answer correct?"
            }
        }
    }
}

impl std::fmt::Display for ProofMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
