//! Per-blank feedback and score aggregation.

use crate::matcher::MatchOutcome;
use crate::model::{AnswerKey, BlankLocation, PerBlankFeedback};

/// Default label shown in place of an empty answer.
pub const DEFAULT_EMPTY_LABEL: &str = "(empty)";

/// Message for a correct blank under per-blank feedback.
pub const CORRECT_MESSAGE: &str = "Correct";

/// Assembles feedback records.
#[derive(Debug, Clone)]
pub struct FeedbackBuilder {
    empty_label: String,
}

impl Default for FeedbackBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_EMPTY_LABEL)
    }
}

impl FeedbackBuilder {
    pub fn new(empty_label: impl Into<String>) -> Self {
        Self {
            empty_label: empty_label.into(),
        }
    }

    /// One record per blank in `0..answers.len()`.
    ///
    /// `reference_answer` is the key entry at the same position, shown for
    /// information; it is not necessarily the entry that matched.
    pub fn build(
        &self,
        answers: &[&str],
        key: &AnswerKey,
        locations: &[BlankLocation],
        outcome: &MatchOutcome,
    ) -> Vec<PerBlankFeedback> {
        answers
            .iter()
            .enumerate()
            .map(|(i, user_answer)| {
                let reference = key.get(i);
                let is_correct = outcome.verdicts.get(i).copied().unwrap_or(false);
                let status_message = match &outcome.uniform_message {
                    Some(message) => message.clone(),
                    None if is_correct => CORRECT_MESSAGE.to_string(),
                    None => self.mismatch_message(reference, user_answer),
                };
                PerBlankFeedback {
                    blank_index: i,
                    user_answer: user_answer.to_string(),
                    reference_answer: reference.to_string(),
                    is_correct,
                    status_message,
                    sentence_index: locations.get(i).and_then(|l| l.sentence_index),
                }
            })
            .collect()
    }

    fn mismatch_message(&self, reference: &str, user_answer: &str) -> String {
        let got = if user_answer.trim().is_empty() {
            self.empty_label.as_str()
        } else {
            user_answer
        };
        format!("Expected: {reference}, Got: {got}")
    }
}

/// Percentage of credited blanks, rounded half away from zero.
///
/// Zero blanks scores 0.
pub fn score(correct_count: usize, total_blanks: usize) -> u8 {
    if total_blanks == 0 {
        return 0;
    }
    let ratio = correct_count.min(total_blanks) as f64 / total_blanks as f64;
    (ratio * 100.0).round() as u8
}
