//! Matching for "arrange in order" exercises.
//!
//! The learner must lay out the key's values as a monotonic sequence. Credit
//! is coarse and uniform: all blanks, half of them (rounded down), or none.
//! Every blank gets the same verdict and message; the matcher does not point
//! at which value is misplaced.

use std::cmp::Ordering;

use crate::matcher::{normalize, MatchOutcome, MatchStrategy};
use crate::model::{AnswerKey, Direction};

pub const MSG_CORRECT: &str = "Correct";
pub const MSG_INCOMPLETE: &str = "Incomplete sequence: every position must be filled";
pub const MSG_WRONG_VALUES: &str = "The sequence is ordered but does not use the expected values";

/// Sequence/monotonicity matcher.
#[derive(Debug, Clone, Copy)]
pub struct OrderingMatcher {
    direction: Direction,
}

impl OrderingMatcher {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn uniform(&self, total: usize, correct: bool, credit: usize, message: &str) -> MatchOutcome {
        MatchOutcome {
            verdicts: vec![correct; total],
            correct_count: credit,
            uniform_message: Some(message.to_string()),
        }
    }
}

impl MatchStrategy for OrderingMatcher {
    fn name(&self) -> &'static str {
        match self.direction {
            Direction::Ascending => "ordering-ascending",
            Direction::Descending => "ordering-descending",
        }
    }

    fn evaluate(&self, answers: &[&str], key: &AnswerKey) -> MatchOutcome {
        let total = answers.len();
        if total == 0 {
            return MatchOutcome::from_verdicts(Vec::new());
        }

        // No partial credit for an incomplete sequence.
        if answers.iter().any(|a| a.trim().is_empty()) {
            return self.uniform(total, false, 0, MSG_INCOMPLETE);
        }

        let submitted = Sequence::parse(
            answers.iter().copied(),
            key.values.iter().map(String::as_str),
        );
        let monotonic = submitted.is_monotonic(self.direction);
        let same_values = submitted.same_values();

        match (monotonic, same_values) {
            (true, true) => self.uniform(total, true, total, MSG_CORRECT),
            (true, false) => self.uniform(total, false, total / 2, MSG_WRONG_VALUES),
            (false, _) => {
                let message = format!("Values are not in {} order", self.direction);
                self.uniform(total, false, 0, &message)
            }
        }
    }
}

/// Submitted and key values, compared numerically when every value on both
/// sides is a number, as normalized strings otherwise.
#[derive(Debug)]
enum Sequence {
    Numbers { submitted: Vec<f64>, key: Vec<f64> },
    Strings { submitted: Vec<String>, key: Vec<String> },
}

impl Sequence {
    fn parse<'a>(
        submitted: impl Iterator<Item = &'a str>,
        key: impl Iterator<Item = &'a str>,
    ) -> Self {
        let submitted: Vec<&str> = submitted.collect();
        let key: Vec<&str> = key.collect();

        match (parse_all(&submitted), parse_all(&key)) {
            (Some(submitted), Some(key)) => Sequence::Numbers { submitted, key },
            _ => Sequence::Strings {
                submitted: submitted.iter().map(|v| normalize(v)).collect(),
                key: key.iter().map(|v| normalize(v)).collect(),
            },
        }
    }

    fn is_monotonic(&self, direction: Direction) -> bool {
        let allowed = |ord: Ordering| match direction {
            Direction::Ascending => ord != Ordering::Greater,
            Direction::Descending => ord != Ordering::Less,
        };
        match self {
            Sequence::Numbers { submitted, .. } => submitted
                .windows(2)
                .all(|w| allowed(w[0].total_cmp(&w[1]))),
            Sequence::Strings { submitted, .. } => {
                submitted.windows(2).all(|w| allowed(w[0].cmp(&w[1])))
            }
        }
    }

    /// Multiset equality of submitted and key values.
    fn same_values(&self) -> bool {
        match self {
            Sequence::Numbers { submitted, key } => {
                let mut a = submitted.clone();
                let mut b = key.clone();
                a.sort_by(f64::total_cmp);
                b.sort_by(f64::total_cmp);
                a == b
            }
            Sequence::Strings { submitted, key } => {
                let mut a = submitted.clone();
                let mut b = key.clone();
                a.sort();
                b.sort();
                a == b
            }
        }
    }
}

fn parse_all(values: &[&str]) -> Option<Vec<f64>> {
    values.iter().map(|v| parse_number(v)).collect()
}

/// Parse a decimal number, accepting a comma as decimal separator.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(values: &[&str]) -> AnswerKey {
        AnswerKey::new(values.iter().map(|v| v.to_string()).collect())
    }

    fn decimals() -> AnswerKey {
        key(&["0.9", "0.85", "0.08", "0.8", "0.18"])
    }

    #[test]
    fn sorted_ascending_scores_full() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["0.08", "0.18", "0.8", "0.85", "0.9"], &decimals());
        assert_eq!(outcome.correct_count, 5);
        assert!(outcome.verdicts.iter().all(|v| *v));
        assert_eq!(outcome.uniform_message.as_deref(), Some(MSG_CORRECT));
    }

    #[test]
    fn authored_order_scores_zero() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["0.9", "0.85", "0.08", "0.8", "0.18"], &decimals());
        assert_eq!(outcome.correct_count, 0);
        assert!(outcome.verdicts.iter().all(|v| !*v));
        assert_eq!(
            outcome.uniform_message.as_deref(),
            Some("Values are not in ascending order")
        );
    }

    #[test]
    fn descending() {
        let outcome = OrderingMatcher::new(Direction::Descending)
            .evaluate(&["0.9", "0.85", "0.8", "0.18", "0.08"], &decimals());
        assert_eq!(outcome.correct_count, 5);
    }

    #[test]
    fn ordered_wrong_values_half_credit() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["0.01", "0.18", "0.8", "0.85", "0.9"], &decimals());
        assert_eq!(outcome.correct_count, 2);
        assert!(outcome.verdicts.iter().all(|v| !*v));
        assert_eq!(outcome.uniform_message.as_deref(), Some(MSG_WRONG_VALUES));
    }

    #[test]
    fn any_empty_scores_zero() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["0.08", "0.18", "", "0.85", "0.9"], &decimals());
        assert_eq!(outcome.correct_count, 0);
        assert_eq!(outcome.uniform_message.as_deref(), Some(MSG_INCOMPLETE));
        assert_eq!(outcome.verdicts.len(), 5);
    }

    #[test]
    fn numeric_equivalence_ignores_formatting() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["0,08", "0.180", "0.8", "0.85", "0.90"], &decimals());
        assert_eq!(outcome.correct_count, 5);
    }

    #[test]
    fn numeric_not_lexicographic() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["2", "10", "100"], &key(&["100", "2", "10"]));
        assert_eq!(outcome.correct_count, 3);
    }

    #[test]
    fn string_comparison_when_not_all_numeric() {
        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["Abricot", "banane", "cerise"], &key(&["cerise", "abricot", "banane"]));
        assert_eq!(outcome.correct_count, 3);

        let outcome = OrderingMatcher::new(Direction::Ascending)
            .evaluate(&["cerise", "banane", "abricot"], &key(&["cerise", "abricot", "banane"]));
        assert_eq!(outcome.correct_count, 0);
    }

    #[test]
    fn no_blanks() {
        let outcome = OrderingMatcher::new(Direction::Ascending).evaluate(&[], &decimals());
        assert_eq!(outcome.correct_count, 0);
        assert!(outcome.verdicts.is_empty());
    }

    #[test]
    fn parse_number_variants() {
        assert_eq!(parse_number(" 0,85 "), Some(0.85));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("1 000"), Some(1000.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }
}
