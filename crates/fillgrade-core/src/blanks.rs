//! Blank marker counting and location.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::model::{BlankLocation, ContentBody};

/// Default blank marker: three underscores.
pub const DEFAULT_BLANK_MARKER: &str = "___";

/// Characters that may sit directly between two blanks (`___<___`).
pub const DEFAULT_DELIMITERS: [char; 9] = ['<', '>', '=', '≤', '≥', ',', ';', '|', '/'];

/// Blanks found in a content body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlankExtraction {
    /// Total number of blank markers.
    pub total: usize,
    /// Location of each blank, indexed by global blank index.
    pub locations: Vec<BlankLocation>,
}

/// Counts and locates blank markers.
#[derive(Debug, Clone)]
pub struct BlankExtractor {
    marker: String,
    delimiters: Vec<char>,
}

impl Default for BlankExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_BLANK_MARKER, DEFAULT_DELIMITERS.to_vec())
    }
}

impl BlankExtractor {
    /// Delimiters that also occur in `marker` are not padded, otherwise the
    /// marker itself would be split apart.
    pub fn new(marker: impl Into<String>, mut delimiters: Vec<char>) -> Self {
        let marker = marker.into();
        delimiters.retain(|c| !marker.contains(*c));
        Self { marker, delimiters }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Count and locate every blank in `body`.
    pub fn extract(&self, body: &ContentBody) -> BlankExtraction {
        let mut locations = Vec::new();
        match body {
            ContentBody::Sentences(sentences) => {
                for (sentence_index, sentence) in sentences.iter().enumerate() {
                    let count = self.count(sentence);
                    locations.extend((0..count).map(|local_index| BlankLocation {
                        sentence_index: Some(sentence_index),
                        local_index,
                    }));
                }
            }
            ContentBody::Text(text) => {
                let count = self.count(text);
                locations.extend((0..count).map(|local_index| BlankLocation {
                    sentence_index: None,
                    local_index,
                }));
            }
            ContentBody::Missing => {}
        }

        BlankExtraction {
            total: locations.len(),
            locations,
        }
    }

    /// Number of non-overlapping markers in `text`.
    pub fn count(&self, text: &str) -> usize {
        if self.marker.is_empty() {
            return 0;
        }
        self.pad_delimiters(text).matches(self.marker.as_str()).count()
    }

    /// Surround bare delimiters with spaces so that neighbouring markers stay
    /// separate tokens.
    fn pad_delimiters<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.chars().any(|c| self.delimiters.contains(&c)) {
            return Cow::Borrowed(text);
        }
        let mut padded = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            if self.delimiters.contains(&c) {
                padded.push(' ');
                padded.push(c);
                padded.push(' ');
            } else {
                padded.push(c);
            }
        }
        Cow::Owned(padded)
    }
}
