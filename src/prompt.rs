//! Prompt conventions shared with the chat and test wrappers of the trained model.
//!
//! A question is sent as `<Q>question</Q>\n<A>` and the model's answer is whatever it
//! writes between `<A>` and `</A>`.

use crate::corpus::{DelimiterVocabulary, Role};

const EXIT_COMMANDS: &[&str] = &["quit", "exit", "q"];

/// Wrap a bare question; input that already opens with the question marker is kept.
pub fn format_prompt(input: &str, vocab: &DelimiterVocabulary) -> String {
    let input = input.trim();
    let question = vocab.pair(Role::Question);
    if input.starts_with(&question.open) {
        return input.to_string();
    }
    format!("{}\n{}", vocab.wrap(Role::Question, input), vocab.pair(Role::Answer).open)
}

/// Pull the answer out of generated text.
///
/// Takes the text after the last answer marker up to its closing marker (or the end).
/// Without an answer marker, falls back to whatever follows the prompt.
pub fn extract_answer(generated: &str, prompt: &str, vocab: &DelimiterVocabulary) -> String {
    let answer = vocab.pair(Role::Answer);
    match generated.rsplit_once(&answer.open) {
        Some((_, tail)) => tail.split(&answer.close).next().unwrap_or(tail).trim().to_string(),
        None => generated.strip_prefix(prompt).unwrap_or(generated).trim().to_string(),
    }
}

pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_COMMANDS.contains(&input.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_prompt_tests() {
        let vocab = DelimiterVocabulary::default();
        assert_eq!(format_prompt("How do I scan?", &vocab), "<Q>How do I scan?</Q>\n<A>");
        assert_eq!(format_prompt("  spaced  ", &vocab), "<Q>spaced</Q>\n<A>");
        assert_eq!(format_prompt("<Q>already</Q>\n<A>", &vocab), "<Q>already</Q>\n<A>");
    }

    #[test]
    fn extract_answer_tests() {
        let vocab = DelimiterVocabulary::default();
        let prompt = "<Q>ports?</Q>\n<A>";
        assert_eq!(
            extract_answer("<Q>ports?</Q>\n<A> nmap -p- host </A>\n<Q>next", prompt, &vocab),
            "nmap -p- host"
        );
        assert_eq!(extract_answer("<Q>ports?</Q>\n<A>unterminated", prompt, &vocab), "unterminated");
        assert_eq!(
            extract_answer("<A>first</A><A>second</A>", prompt, &vocab),
            "second"
        );
        assert_eq!(extract_answer("plain prompt then text", "plain prompt", &vocab), "then text");
        assert_eq!(extract_answer("unrelated", "prompt", &vocab), "unrelated");
    }

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command(" EXIT "));
        assert!(is_exit_command("q"));
        assert!(!is_exit_command("quite"));
        assert!(!is_exit_command(""));
    }
}
