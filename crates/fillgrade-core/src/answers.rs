//! Canonical answer resolution.

use serde_json::{Map, Value};

use crate::content::read_entries;
use crate::error::{value_kind, ContentError};
use crate::model::AnswerKey;

/// Answer field names, highest priority first.
pub const ANSWER_FIELDS: [&str; 3] = ["words", "available_words", "answers"];

/// Extract the ordered answer list from a raw record.
///
/// The first field in [`ANSWER_FIELDS`] holding a non-empty list wins; lists
/// from different fields are never merged. No field at all yields an empty key.
pub fn resolve(map: &Map<String, Value>) -> Result<AnswerKey, ContentError> {
    for field in ANSWER_FIELDS {
        match map.get(field) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) if items.is_empty() => continue,
            Some(Value::Array(items)) => {
                return Ok(AnswerKey {
                    values: read_entries(field, items)?,
                    source: Some(field.to_string()),
                });
            }
            Some(other) => {
                return Err(ContentError::invalid_field(
                    field,
                    format!("expected a list, got {}", value_kind(other)),
                ))
            }
        }
    }
    Ok(AnswerKey::default())
}

/// Number of blanks to score against when markers and answers disagree.
///
/// Takes the larger of the two so that no authored blank or answer is
/// dropped. This does not decide which side the author got wrong.
pub fn scoring_total(blank_count: usize, answer_count: usize) -> usize {
    blank_count.max(answer_count)
}
