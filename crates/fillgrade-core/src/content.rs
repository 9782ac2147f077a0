//! Normalization of raw content records into [`ExerciseContent`].
//!
//! Authored content comes in several historical shapes: a `sentences` list or
//! a single `text` field, answers under one of several names, entries that are
//! bare strings or small records. All of that is resolved here, once.

use serde_json::{Map, Value};

use crate::answers;
use crate::error::{value_kind, ContentError};
use crate::model::{AnswerKey, ContentBody, ExerciseContent};

/// Field holding an ordered list of sentences.
pub const SENTENCES_FIELD: &str = "sentences";
/// Field holding a single block of text.
pub const TEXT_FIELD: &str = "text";

/// Keys checked, in order, when an entry is a record instead of a string.
const ENTRY_TEXT_KEYS: [&str; 4] = ["value", "text", "word", "answer"];

impl ExerciseContent {
    /// Content made of sentences.
    pub fn sentences<I, S>(sentences: I, answers: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            body: ContentBody::Sentences(sentences.into_iter().map(Into::into).collect()),
            answer_key: AnswerKey::new(answers),
        }
    }

    /// Content made of a single text.
    pub fn text(text: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            body: ContentBody::Text(text.into()),
            answer_key: AnswerKey::new(answers),
        }
    }

    /// Normalize a raw record.
    ///
    /// Accepts a JSON object, or a string holding an encoded JSON object
    /// (how older exercises were stored).
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(encoded) => Self::from_json_str(encoded),
            other => Err(ContentError::NotAnObject(value_kind(other))),
        }
    }

    /// Normalize a record encoded as a JSON string.
    pub fn from_json_str(encoded: &str) -> Result<Self, ContentError> {
        let decoded: Value =
            serde_json::from_str(encoded).map_err(|e| ContentError::InvalidJson(e.to_string()))?;
        match decoded {
            Value::Object(map) => Self::from_map(&map),
            other => Err(ContentError::NotAnObject(value_kind(&other))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, ContentError> {
        Ok(Self {
            body: read_body(map)?,
            answer_key: answers::resolve(map)?,
        })
    }
}

impl TryFrom<Value> for ExerciseContent {
    type Error = ContentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

/// A non-empty sentence list wins; the text field is only read otherwise, so a
/// record carrying both is never counted twice.
fn read_body(map: &Map<String, Value>) -> Result<ContentBody, ContentError> {
    match map.get(SENTENCES_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) if items.is_empty() => {}
        Some(Value::Array(items)) => {
            let sentences = read_entries(SENTENCES_FIELD, items)?;
            return Ok(ContentBody::Sentences(sentences));
        }
        Some(other) => {
            return Err(ContentError::invalid_field(
                SENTENCES_FIELD,
                format!("expected a list, got {}", value_kind(other)),
            ))
        }
    }

    match map.get(TEXT_FIELD) {
        None | Some(Value::Null) => Ok(ContentBody::Missing),
        Some(Value::String(text)) => Ok(ContentBody::Text(text.clone())),
        Some(other) => Err(ContentError::invalid_field(
            TEXT_FIELD,
            format!("expected a string, got {}", value_kind(other)),
        )),
    }
}

/// Read every entry of a list field as text.
pub(crate) fn read_entries(field: &str, items: &[Value]) -> Result<Vec<String>, ContentError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            entry_text(item).ok_or_else(|| {
                ContentError::invalid_field(
                    field,
                    format!("entry {i} is {} without a text value", value_kind(item)),
                )
            })
        })
        .collect()
}

/// Textual value of a list entry: strings as-is, numbers and booleans
/// rendered, records through their first known text key.
fn entry_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(record) => ENTRY_TEXT_KEYS
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        Value::Null | Value::Array(_) => None,
    }
}
