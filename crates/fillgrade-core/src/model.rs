//! Core data model types for fillgrade.
//!
//! These are the types the engine consumes (exercise content, submissions)
//! and produces (evaluation results with per-blank feedback).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix of the form fields a submission is built from (`answer_0`, ...).
pub const ANSWER_FIELD_PREFIX: &str = "answer_";

/// An authored exercise: free-text instructions plus structured content.
#[derive(Debug, Clone, Deserialize)]
pub struct Exercise {
    /// Unique identifier for this exercise.
    pub id: String,
    /// Instructions shown to the learner. Also used to detect ordering exercises.
    #[serde(default)]
    pub description: String,
    /// The normalized content record.
    pub content: ExerciseContent,
}

/// Normalized exercise content.
///
/// Built once at the boundary from the raw record (see [`crate::content`]) so
/// that nothing downstream inspects raw field names again.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ExerciseContent {
    /// Where the blanks live.
    pub body: ContentBody,
    /// The canonical answers, in authoring order.
    pub answer_key: AnswerKey,
}

/// The text carrying blank markers.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBody {
    /// Ordered sentences, each with zero or more blanks.
    Sentences(Vec<String>),
    /// A single block of text.
    Text(String),
    /// Neither a sentence list nor a text field was present.
    Missing,
}

/// Ordered canonical answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerKey {
    /// Answer strings, index-aligned to blanks by authoring position.
    pub values: Vec<String>,
    /// Name of the raw field the answers were read from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AnswerKey {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The answer authored at `index`, or `""` past the end.
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Position of a blank inside the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankLocation {
    /// Owning sentence, `None` for single-text content.
    pub sentence_index: Option<usize>,
    /// Index of the blank within its sentence (or within the text).
    pub local_index: usize,
}

/// A learner's raw answers, keyed by global blank index.
///
/// Sparse: missing entries read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    answers: BTreeMap<usize, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dense submission from answers given in blank order.
    pub fn from_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .enumerate()
                .map(|(i, a)| (i, a.into()))
                .collect(),
        }
    }

    /// Build a submission from form fields named `answer_<N>`.
    ///
    /// Fields with any other name are ignored.
    pub fn from_form_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::new();
        for (name, value) in fields {
            let index = name
                .as_ref()
                .strip_prefix(ANSWER_FIELD_PREFIX)
                .and_then(|n| n.parse::<usize>().ok());
            if let Some(index) = index {
                submission.set(index, value);
            }
        }
        submission
    }

    pub fn set(&mut self, index: usize, answer: impl Into<String>) {
        self.answers.insert(index, answer.into());
    }

    /// The raw answer for a blank, or `""` if the learner left it out.
    pub fn get(&self, index: usize) -> &str {
        self.answers.get(&index).map(String::as_str).unwrap_or("")
    }

    /// Raw answers for blanks `0..total`, missing entries filled with `""`.
    pub fn answers_for(&self, total: usize) -> Vec<&str> {
        (0..total).map(|i| self.get(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Direction of an ordering exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascending" | "asc" => Ok(Direction::Ascending),
            "descending" | "desc" => Ok(Direction::Descending),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Exercise variant, detected from the instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Standard,
    OrderingAscending,
    OrderingDescending,
}

impl ExerciseKind {
    pub fn ordering(direction: Direction) -> Self {
        match direction {
            Direction::Ascending => ExerciseKind::OrderingAscending,
            Direction::Descending => ExerciseKind::OrderingDescending,
        }
    }

    /// The ordering direction, or `None` for standard exercises.
    pub fn direction(self) -> Option<Direction> {
        match self {
            ExerciseKind::Standard => None,
            ExerciseKind::OrderingAscending => Some(Direction::Ascending),
            ExerciseKind::OrderingDescending => Some(Direction::Descending),
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseKind::Standard => write!(f, "standard"),
            ExerciseKind::OrderingAscending => write!(f, "ordering (ascending)"),
            ExerciseKind::OrderingDescending => write!(f, "ordering (descending)"),
        }
    }
}

/// Outcome of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Which matcher produced the result.
    pub kind: ExerciseKind,
    /// Percentage score, 0..=100.
    pub score: u8,
    /// Number of blanks credited.
    pub correct_count: usize,
    /// Number of blanks scored against.
    pub total_blanks: usize,
    /// One entry per blank, in blank order.
    pub details: Vec<PerBlankFeedback>,
    /// Content anomalies noticed while evaluating.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<EvaluationNotice>,
}

/// Feedback for a single blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerBlankFeedback {
    pub blank_index: usize,
    pub user_answer: String,
    /// The answer authored at this position. Informational only: standard
    /// matching searches the whole key, not this entry.
    pub reference_answer: String,
    pub is_correct: bool,
    pub status_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_index: Option<usize>,
}

/// Non-fatal content problems surfaced alongside a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationNotice {
    /// Content had neither a sentence list nor a text field.
    NoBlankSource,
    /// No recognized answer field was present.
    AnswerKeyMissing,
    /// Blank markers and canonical answers disagree in number.
    CountMismatch { blanks: usize, answers: usize },
}

impl fmt::Display for EvaluationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationNotice::NoBlankSource => {
                write!(f, "content has neither sentences nor text")
            }
            EvaluationNotice::AnswerKeyMissing => write!(f, "content has no answer key"),
            EvaluationNotice::CountMismatch { blanks, answers } => write!(
                f,
                "{blanks} blank(s) but {answers} answer(s); scoring against {}",
                blanks.max(answers)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_from_form_fields() {
        let sub = Submission::from_form_fields(vec![
            ("answer_1", "pomme"),
            ("answer_0", "chat"),
            ("csrf_token", "abc"),
            ("answer_x", "ignored"),
        ]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get(0), "chat");
        assert_eq!(sub.get(1), "pomme");
        assert_eq!(sub.get(7), "");
    }

    #[test]
    fn submission_answers_for_fills_gaps() {
        let mut sub = Submission::new();
        sub.set(2, "c");
        assert_eq!(sub.answers_for(4), vec!["", "", "c", ""]);
    }

    #[test]
    fn submission_serializes_as_index_map() {
        let sub = Submission::from_answers(["chat", "pomme"]);
        let json = serde_json::to_string(&sub).unwrap();
        assert_eq!(json, r#"{"0":"chat","1":"pomme"}"#);
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(Direction::Ascending.to_string(), "ascending");
        assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Descending);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn kind_direction() {
        assert_eq!(ExerciseKind::Standard.direction(), None);
        assert_eq!(
            ExerciseKind::ordering(Direction::Descending),
            ExerciseKind::OrderingDescending
        );
        assert_eq!(
            ExerciseKind::OrderingAscending.direction(),
            Some(Direction::Ascending)
        );
    }

    #[test]
    fn answer_key_get_past_end() {
        let key = AnswerKey::new(vec!["a".into()]);
        assert_eq!(key.get(0), "a");
        assert_eq!(key.get(3), "");
    }

    #[test]
    fn notice_serializes_tagged() {
        let notice = EvaluationNotice::CountMismatch {
            blanks: 2,
            answers: 3,
        };
        let json = serde_json::to_value(notice).unwrap();
        assert_eq!(json["type"], "count_mismatch");
        assert_eq!(json["answers"], 3);
    }
}
