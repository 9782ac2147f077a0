//! Exercise set loading.
//!
//! Loads exercise sets from TOML (or JSON) files and directories, and
//! validates them for authoring problems the engine would otherwise paper over.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::Evaluator;
use crate::model::{ContentBody, Exercise, ExerciseContent};
use crate::ordering::parse_number;

/// A named collection of exercises.
#[derive(Debug, Clone)]
pub struct ExerciseSet {
    /// Unique identifier for this set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this set.
    pub description: String,
    /// The exercises in this set.
    pub exercises: Vec<Exercise>,
    /// Exercises left out because their content could not be read.
    pub rejected: Vec<RejectedExercise>,
}

/// An exercise dropped at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedExercise {
    pub id: String,
    pub reason: String,
}

impl ExerciseSet {
    /// Look up an exercise by id.
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Look up a rejected exercise by id.
    pub fn rejected(&self, id: &str) -> Option<&RejectedExercise> {
        self.rejected.iter().find(|r| r.id == id)
    }
}

/// Summary of an exercise set (without the exercises).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSetSummary {
    pub id: String,
    pub name: String,
    pub exercise_count: usize,
}

impl From<&ExerciseSet> for ExerciseSetSummary {
    fn from(set: &ExerciseSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            exercise_count: set.exercises.len(),
        }
    }
}

impl ExerciseSetSummary {
    /// Summary covering several sets, as when a whole directory is graded.
    /// A single set keeps its own id and name.
    pub fn combined(sets: &[ExerciseSet]) -> Self {
        if let [set] = sets {
            return Self::from(set);
        }
        Self {
            id: sets.iter().map(|s| s.id.as_str()).collect::<Vec<_>>().join("+"),
            name: sets.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", "),
            exercise_count: sets.iter().map(|s| s.exercises.len()).sum(),
        }
    }
}

/// Intermediate structure for parsing exercise set files.
#[derive(Debug, Deserialize)]
struct RawExerciseFile {
    exercise_set: RawSetHeader,
    #[serde(default)]
    exercises: Vec<RawExercise>,
}

#[derive(Debug, Deserialize)]
struct RawSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    id: String,
    #[serde(default)]
    description: String,
    content: serde_json::Value,
}

/// Parse a single exercise set file. `.json` files are read as JSON,
/// everything else as TOML.
pub fn parse_exercise_set(path: &Path) -> Result<ExerciseSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise set file: {}", path.display()))?;

    parse_exercise_set_str(&content, path)
}

/// Parse an exercise set from a string (useful for testing).
pub fn parse_exercise_set_str(content: &str, source_path: &Path) -> Result<ExerciseSet> {
    let is_json = source_path.extension().is_some_and(|ext| ext == "json");
    let parsed: RawExerciseFile = if is_json {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?
    } else {
        toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?
    };

    // Malformed content drops only that exercise.
    let mut exercises = Vec::with_capacity(parsed.exercises.len());
    let mut rejected = Vec::new();
    for raw in parsed.exercises {
        match ExerciseContent::from_value(&raw.content) {
            Ok(content) => exercises.push(Exercise {
                id: raw.id,
                description: raw.description,
                content,
            }),
            Err(e) => {
                tracing::warn!(
                    "skipping exercise `{}` in {}: {e}",
                    raw.id,
                    source_path.display()
                );
                rejected.push(RejectedExercise {
                    id: raw.id,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ExerciseSet {
        id: parsed.exercise_set.id,
        name: parsed.exercise_set.name,
        description: parsed.exercise_set.description,
        exercises,
        rejected,
    })
}

/// Recursively load all `.toml` and `.json` exercise set files from a directory.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<ExerciseSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_exercise_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_exercise_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file, or every set under a directory.
pub fn load_exercise_sets(path: &Path) -> Result<Vec<ExerciseSet>> {
    if path.is_dir() {
        load_exercise_directory(path)
    } else {
        Ok(vec![parse_exercise_set(path)?])
    }
}

/// A warning from exercise set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise ID (if applicable).
    pub exercise_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(exercise_id: &str, message: impl Into<String>) -> Self {
        Self {
            exercise_id: Some(exercise_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate an exercise set for common authoring issues.
pub fn validate_exercise_set(set: &ExerciseSet, evaluator: &Evaluator) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.exercises.is_empty() {
        warnings.push(ValidationWarning {
            exercise_id: None,
            message: "exercise set has no exercises".into(),
        });
    }

    for rejected in &set.rejected {
        warnings.push(ValidationWarning::new(
            &rejected.id,
            format!("malformed content, exercise skipped: {}", rejected.reason),
        ));
    }

    let mut seen_ids = HashSet::new();
    for exercise in &set.exercises {
        if !seen_ids.insert(&exercise.id) {
            warnings.push(ValidationWarning::new(
                &exercise.id,
                format!("duplicate exercise ID: {}", exercise.id),
            ));
        }
    }

    for exercise in &set.exercises {
        let content = &exercise.content;
        let blanks = evaluator.extractor().extract(&content.body).total;
        let answers = content.answer_key.len();

        if matches!(content.body, ContentBody::Missing) {
            warnings.push(ValidationWarning::new(
                &exercise.id,
                "content has neither sentences nor text; it will always score 0",
            ));
        } else if blanks == 0 {
            warnings.push(ValidationWarning::new(
                &exercise.id,
                format!("no `{}` blank markers found", evaluator.extractor().marker()),
            ));
        }

        if answers == 0 {
            warnings.push(ValidationWarning::new(&exercise.id, "no answer key"));
        } else if blanks > 0 && blanks != answers {
            warnings.push(ValidationWarning::new(
                &exercise.id,
                format!(
                    "{blanks} blank(s) but {answers} answer(s); scoring will use {}",
                    blanks.max(answers)
                ),
            ));
        }

        let kind = evaluator.classifier().classify(&exercise.description);
        if kind.direction().is_some() && answers > 0 {
            let numeric = content
                .answer_key
                .values
                .iter()
                .filter(|v| parse_number(v).is_some())
                .count();
            if numeric > 0 && numeric < answers {
                warnings.push(ValidationWarning::new(
                    &exercise.id,
                    "ordering exercise mixes numeric and non-numeric answers; \
                     values will be compared as text",
                ));
            }
        }
    }

    warnings
}
