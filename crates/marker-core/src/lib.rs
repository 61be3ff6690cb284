//! # marker-core
//!
//! Deterministic grading logic for math-marker.
//!
//! This crate decides whether a generated answer matches the expected one
//! whenever that can be done without a language model, and reduces a
//! judge reply to a verdict when it cannot.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No LLM calls**: Judging lives in `marker-runtime`
//! 3. **Bounded confidence**: Every verdict carries a confidence in [0, 1]
//!
//! ## Example
//!
//! ```rust
//! use marker_core::{compare_numeric, VoteCounting, VoteTally};
//!
//! let evaluation = compare_numeric("4", "4.0").expect("both are numbers");
//! assert!(evaluation.is_correct());
//!
//! // Not numeric: a judge has to look at it
//! assert!(compare_numeric("Yes, by contradiction", "Yes").is_none());
//!
//! let tally = VoteTally::count("CORRECT\nCORRECT\nINCORRECT", VoteCounting::WholeToken);
//! assert!(tally.result());
//! ```

pub mod methods;
pub mod numeric;
pub mod tally;
pub mod types;

// Re-export main types at crate root
pub use methods::ProofMethod;
pub use numeric::{compare_numeric, parse_number, Number, NumberParse, EPSILON};
pub use tally::{VoteCounting, VoteTally};
pub use types::{Evaluation, EvaluationSummary, ProblemRecord, ResultRecord};
