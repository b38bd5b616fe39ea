//! Hand-curated `User:` / `Bot:` question files.

use std::path::Path;

use log::{error, info, warn};

use super::vocab::TrainingExample;

const USER_PREFIX: &str = "User:";
const BOT_PREFIX: &str = "Bot:";

#[derive(Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    AwaitingAnswer(String),
}

/// Pair every `User:` line with the next `Bot:` line.
///
/// A new `User:` line replaces a pending question; a `Bot:` line always returns to
/// idle, so a half pair never survives past the answer line that follows it.
pub fn parse_curated(text: &str) -> Vec<TrainingExample> {
    let mut state = State::Idle;
    let mut out = vec![];
    for line in text.lines().map(str::trim) {
        if let Some(question) = line.strip_prefix(USER_PREFIX) {
            let question = question.trim();
            state = if question.is_empty() {
                State::Idle
            } else {
                State::AwaitingAnswer(question.to_string())
            };
        } else if let Some(answer) = line.strip_prefix(BOT_PREFIX) {
            let answer = answer.trim();
            if let State::AwaitingAnswer(question) = std::mem::take(&mut state) {
                if !answer.is_empty() {
                    out.push(TrainingExample::new(question, answer));
                }
            }
        }
    }
    out
}

/// Read and parse a curated file. Absence or read failure yields no examples.
pub fn load_curated(path: impl AsRef<Path>) -> Vec<TrainingExample> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(target: "corpus", "Training questions file not found: {path:?}");
        return vec![];
    }
    info!(target: "corpus", "Loading training questions from {path:?}");
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let examples = parse_curated(&text);
            info!(target: "corpus", "Loaded {} curated training questions", examples.len());
            examples
        }
        Err(err) => {
            error!(target: "corpus", "Error loading training questions: {err}");
            vec![]
        }
    }
}
