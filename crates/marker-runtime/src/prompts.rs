//! Prompts for the multi-method judge.

use marker_core::ProofMethod;

/// System prompt sent with every judge request.
pub const SYSTEM_PROMPT: &str =
    "You are a mathematical evaluation expert focusing on specific proof methods.";

/// Build the user prompt for one problem.
///
/// Lists all five proof methods in order and asks for a CORRECT or
/// INCORRECT conclusion under each.
pub fn evaluation_prompt(question: &str, correct_answer: &str, generated_answer: &str) -> String {
    let methods = ProofMethod::ALL
        .iter()
        .enumerate()
        .map(|(i, method)| format!("{}. {}: {}", i + 1, method.name(), method.instruction()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Question: {question}\n\
         Generated Answer: {generated_answer}\n\
         Correct Answer: {correct_answer}\n\
         \n\
         Please evaluate if the generated answer is correct using the following methods:\n\
         {methods}\n\
         \n\
         For each method, provide your reasoning and conclude with CORRECT or INCORRECT.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_values() {
        let prompt = evaluation_prompt(
            "Is the square root of 2 irrational?",
            "Yes",
            "Yes, by contradiction...",
        );
        assert!(prompt.contains("Question: Is the square root of 2 irrational?"));
        assert!(prompt.contains("Generated Answer: Yes, by contradiction..."));
        assert!(prompt.contains("Correct Answer: Yes"));
    }

    #[test]
    fn test_prompt_lists_methods_in_order() {
        let prompt = evaluation_prompt("q", "a", "b");
        let positions: Vec<usize> = ProofMethod::ALL
            .iter()
            .map(|m| prompt.find(m.name()).expect("method missing from prompt"))
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.contains("1. Numerical Analysis"));
        assert!(prompt.contains("5. Contrapositive Proof"));
    }

    #[test]
    fn test_prompt_asks_for_vote_tokens() {
        let prompt = evaluation_prompt("q", "a", "b");
        assert!(prompt.contains("conclude with CORRECT or INCORRECT"));
    }
}
