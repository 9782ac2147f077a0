//! Detection of ordering exercises from their instructions.
//!
//! Instructions are matched against an ordered rule table, top to bottom;
//! the first rule whose phrase appears in the description decides the kind.
//! Descending rules always sit above ascending ones, because phrasings such as
//! "ordre décroissant" contain an ascending phrase ("croissant") as a substring.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Direction, ExerciseKind};

/// Built-in descending phrases, already folded (lowercase, no accents).
const DESCENDING_PHRASES: &[&str] = &[
    "ordre decroissant",
    "du plus grand au plus petit",
    "de la plus grande a la plus petite",
    "plus grand au plus petit",
    "descending order",
    "in descending",
    "largest to smallest",
    "greatest to least",
    "highest to lowest",
];

/// Built-in ascending phrases, already folded.
const ASCENDING_PHRASES: &[&str] = &[
    "ordre croissant",
    "du plus petit au plus grand",
    "de la plus petite a la plus grande",
    "plus petit au plus grand",
    "ascending order",
    "in ascending",
    "smallest to largest",
    "least to greatest",
    "lowest to highest",
];

/// A single classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierRule {
    /// Ordering direction this phrase signals.
    pub direction: Direction,
    /// Phrase searched for in the description.
    pub phrase: String,
}

impl ClassifierRule {
    pub fn new(direction: Direction, phrase: &str) -> Self {
        Self {
            direction,
            phrase: fold(phrase),
        }
    }
}

/// Classifies exercise descriptions.
#[derive(Debug, Clone)]
pub struct ExerciseClassifier {
    rules: Vec<ClassifierRule>,
}

impl Default for ExerciseClassifier {
    fn default() -> Self {
        Self::with_extra_rules(Vec::new())
    }
}

impl ExerciseClassifier {
    /// Built-in rules plus `extra`, arranged so that every descending rule
    /// precedes every ascending rule. Relative order inside each group is kept,
    /// built-ins first.
    pub fn with_extra_rules(extra: Vec<ClassifierRule>) -> Self {
        let builtin = DESCENDING_PHRASES
            .iter()
            .map(|p| ClassifierRule::new(Direction::Descending, p))
            .chain(
                ASCENDING_PHRASES
                    .iter()
                    .map(|p| ClassifierRule::new(Direction::Ascending, p)),
            );

        let mut rules: Vec<ClassifierRule> = builtin
            .chain(
                extra
                    .into_iter()
                    .map(|r| ClassifierRule::new(r.direction, &r.phrase)),
            )
            .filter(|r| !r.phrase.is_empty())
            .collect();
        rules.sort_by_key(|r| precedence(r.direction));

        Self { rules }
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Detect the exercise kind. No matching rule means a standard exercise.
    pub fn classify(&self, description: &str) -> ExerciseKind {
        let folded = fold(description);
        self.rules
            .iter()
            .find(|rule| folded.contains(rule.phrase.as_str()))
            .map(|rule| ExerciseKind::ordering(rule.direction))
            .unwrap_or(ExerciseKind::Standard)
    }
}

fn precedence(direction: Direction) -> u8 {
    match direction {
        Direction::Descending => 0,
        Direction::Ascending => 1,
    }
}

/// Lowercase, strip common Latin accents, unify apostrophes and collapse
/// whitespace.
fn fold(text: &str) -> String {
    // Decompose first so precomposed and combining accents fold alike.
    let mapped: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            '’' | '`' => '\'',
            other => other,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
