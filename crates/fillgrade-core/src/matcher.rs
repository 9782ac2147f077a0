//! Answer matching strategies.
//!
//! Every exercise kind is scored through [`MatchStrategy`]. Standard
//! exercises use [`StandardMatcher`]; ordering exercises use
//! [`OrderingMatcher`](crate::ordering::OrderingMatcher).

use crate::model::AnswerKey;

/// Per-blank verdicts from a matching strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Correctness of each blank, in blank order.
    pub verdicts: Vec<bool>,
    /// Blanks credited. Usually the number of `true` verdicts, but partial
    /// credit can award more than the verdicts show.
    pub correct_count: usize,
    /// Message shown on every blank instead of per-blank messages.
    pub uniform_message: Option<String>,
}

impl MatchOutcome {
    /// Outcome whose credit is exactly its `true` verdicts.
    pub fn from_verdicts(verdicts: Vec<bool>) -> Self {
        let correct_count = verdicts.iter().filter(|v| **v).count();
        Self {
            verdicts,
            correct_count,
            uniform_message: None,
        }
    }
}

/// A way of deciding which submitted answers earn credit.
pub trait MatchStrategy {
    /// Short strategy name, used in logs.
    fn name(&self) -> &'static str;

    /// Match `answers` (one per blank, already padded to the blank count)
    /// against `key`.
    fn evaluate(&self, answers: &[&str], key: &AnswerKey) -> MatchOutcome;
}

/// Trim, lowercase and collapse inner whitespace.
pub fn normalize(answer: &str) -> String {
    answer
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Order-insensitive matching with consumption.
///
/// Each blank's answer is looked up in a pool holding a copy of the key; a
/// hit removes that entry from the pool. Correct answers typed into the wrong
/// blanks still score, and one key entry never credits two blanks.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMatcher;

impl MatchStrategy for StandardMatcher {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn evaluate(&self, answers: &[&str], key: &AnswerKey) -> MatchOutcome {
        let mut pool: Vec<String> = key.values.iter().map(|v| normalize(v)).collect();

        let verdicts = answers
            .iter()
            .map(|answer| {
                let answer = normalize(answer);
                // Empty never matches, not even an empty key entry.
                if answer.is_empty() {
                    return false;
                }
                match pool.iter().position(|entry| *entry == answer) {
                    Some(pos) => {
                        pool.remove(pos);
                        true
                    }
                    None => false,
                }
            })
            .collect();

        MatchOutcome::from_verdicts(verdicts)
    }
}
