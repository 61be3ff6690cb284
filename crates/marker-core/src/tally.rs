//! CORRECT/INCORRECT vote tally over a judge reply.
//!
//! The judge is asked to finish each proof method with the literal token
//! CORRECT or INCORRECT. The reply is reduced to two counts and a verdict:
//!
//! - `result` is true only when CORRECT votes strictly outnumber INCORRECT
//! - `confidence` is the winning share of all counted votes
//! - a reply with no votes at all is `result = false`, `confidence = 0.0`
//!
//! Because "INCORRECT" contains "CORRECT", plain substring counting credits
//! every INCORRECT vote to both sides. [`VoteCounting::WholeToken`] counts
//! each word once; [`VoteCounting::Substring`] reproduces the overlapping
//! counts for comparison with older result files.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A standalone CORRECT or INCORRECT word, any case.
    static ref VOTE_TOKEN: Regex = Regex::new(r"(?i)\b(in)?correct\b").unwrap();
}

/// How vote tokens are counted in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteCounting {
    /// Whole words only; INCORRECT never counts as CORRECT.
    #[default]
    WholeToken,

    /// Overlapping substring counts; every INCORRECT also counts as CORRECT.
    Substring,
}

/// Vote counts extracted from one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub correct: usize,
    pub incorrect: usize,
}

impl VoteTally {
    /// Count the votes in `reply`.
    pub fn count(reply: &str, counting: VoteCounting) -> Self {
        match counting {
            VoteCounting::WholeToken => {
                let mut tally = Self::default();
                for capture in VOTE_TOKEN.captures_iter(reply) {
                    if capture.get(1).is_some() {
                        tally.incorrect += 1;
                    } else {
                        tally.correct += 1;
                    }
                }
                tally
            }
            VoteCounting::Substring => {
                let upper = reply.to_uppercase();
                Self {
                    correct: upper.matches("CORRECT").count(),
                    incorrect: upper.matches("INCORRECT").count(),
                }
            }
        }
    }

    /// Total votes counted.
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// True when CORRECT strictly outnumbers INCORRECT.
    pub fn result(&self) -> bool {
        self.correct > self.incorrect
    }

    /// Winning share of the votes, 0.0 when nothing was counted.
    pub fn confidence(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct.max(self.incorrect) as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIVE_METHOD_REPLY: &str = "\
1. Numerical Analysis: 2+2 evaluates to 4. CORRECT
2. Logical Reasoning: adding two and two gives four. CORRECT
3. Axiomatic Proof: by the Peano axioms S(S(0)) + S(S(0)) = S(S(S(S(0)))). CORRECT
4. Contradiction Proof: assuming 2+2 != 4 leads to a contradiction. CORRECT
5. Contrapositive Proof: the generated answer would be wrong only if the sum were not 4. INCORRECT";

    #[test]
    fn test_whole_token_counts_each_word_once() {
        let tally = VoteTally::count(FIVE_METHOD_REPLY, VoteCounting::WholeToken);
        assert_eq!(tally, VoteTally { correct: 4, incorrect: 1 });
        assert!(tally.result());
        assert!((tally.confidence() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_substring_double_counts_incorrect() {
        let tally = VoteTally::count(FIVE_METHOD_REPLY, VoteCounting::Substring);
        assert_eq!(tally, VoteTally { correct: 5, incorrect: 1 });
        assert!(tally.result());
    }

    #[test]
    fn test_substring_mode_can_flip_a_loss_into_a_win() {
        let reply = "INCORRECT. INCORRECT. CORRECT.";
        let whole = VoteTally::count(reply, VoteCounting::WholeToken);
        assert_eq!(whole, VoteTally { correct: 1, incorrect: 2 });
        assert!(!whole.result());

        let substring = VoteTally::count(reply, VoteCounting::Substring);
        assert_eq!(substring, VoteTally { correct: 3, incorrect: 2 });
        assert!(substring.result());
    }

    #[test]
    fn test_whole_token_is_case_insensitive() {
        let tally = VoteTally::count("correct, Correct, incorrect", VoteCounting::WholeToken);
        assert_eq!(tally, VoteTally { correct: 2, incorrect: 1 });
    }

    #[test]
    fn test_whole_token_ignores_longer_words() {
        let tally = VoteTally::count(
            "The correctness argument was applied incorrectly. Verdict: CORRECT",
            VoteCounting::WholeToken,
        );
        assert_eq!(tally, VoteTally { correct: 1, incorrect: 0 });
    }

    #[test]
    fn test_no_votes_is_zero_confidence_and_false() {
        for counting in [VoteCounting::WholeToken, VoteCounting::Substring] {
            let tally = VoteTally::count("I cannot decide.", counting);
            assert_eq!(tally.total(), 0);
            assert!(!tally.result());
            assert_eq!(tally.confidence(), 0.0);
        }
    }

    #[test]
    fn test_tie_is_not_correct() {
        let tally = VoteTally::count("CORRECT INCORRECT", VoteCounting::WholeToken);
        assert!(!tally.result());
        assert_eq!(tally.confidence(), 0.5);
    }

    #[test]
    fn test_counting_mode_deserializes_snake_case() {
        let mode: VoteCounting = serde_json::from_str("\"substring\"").unwrap();
        assert_eq!(mode, VoteCounting::Substring);
        let mode: VoteCounting = serde_json::from_str("\"whole_token\"").unwrap();
        assert_eq!(mode, VoteCounting::WholeToken);
    }

    fn reply_from(votes: &[bool]) -> String {
        votes
            .iter()
            .enumerate()
            .map(|(i, v)| format!("Method {}: {}", i + 1, if *v { "CORRECT" } else { "INCORRECT" }))
            .collect::<Vec<_>>()
            .join("\n")
    }

    proptest! {
        #[test]
        fn prop_whole_token_matches_vote_counts(votes in prop::collection::vec(any::<bool>(), 0..12)) {
            let expected_correct = votes.iter().filter(|v| **v).count();
            let expected_incorrect = votes.len() - expected_correct;

            let tally = VoteTally::count(&reply_from(&votes), VoteCounting::WholeToken);
            prop_assert_eq!(tally.correct, expected_correct);
            prop_assert_eq!(tally.incorrect, expected_incorrect);
            prop_assert_eq!(tally.result(), expected_correct > expected_incorrect);
        }

        #[test]
        fn prop_confidence_in_unit_interval(reply in ".{0,200}") {
            for counting in [VoteCounting::WholeToken, VoteCounting::Substring] {
                let tally = VoteTally::count(&reply, counting);
                let confidence = tally.confidence();
                prop_assert!((0.0..=1.0).contains(&confidence));
                if tally.total() > 0 {
                    prop_assert!(confidence >= 0.5);
                }
            }
        }
    }
}
