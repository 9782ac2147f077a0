//! Attempt records and grading reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{EvaluationResult, Submission};
use crate::parser::ExerciseSetSummary;
use crate::statistics::{summarize, ScoreSummary};

/// A graded attempt: the raw submission stored next to its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// When the attempt was graded.
    pub created_at: DateTime<Utc>,
    /// Exercise the attempt answers.
    pub exercise_id: String,
    /// The learner's raw answers.
    pub submission: Submission,
    /// The engine's verdict.
    pub result: EvaluationResult,
}

impl AttemptRecord {
    pub fn new(
        exercise_id: impl Into<String>,
        submission: Submission,
        result: EvaluationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exercise_id: exercise_id.into(),
            submission,
            result,
        }
    }

    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// A batch grading run over one exercise set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the exercise set.
    pub exercise_set: ExerciseSetSummary,
    /// Every graded attempt.
    pub attempts: Vec<AttemptRecord>,
    /// Aggregate statistics.
    pub summary: ScoreSummary,
}

impl GradingReport {
    pub fn new(exercise_set: ExerciseSetSummary, attempts: Vec<AttemptRecord>) -> Self {
        let summary = summarize(&attempts);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exercise_set,
            attempts,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Format the summary as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.exercise_set.name));
        md.push_str(&format!(
            "**Summary:** {} attempts, mean score {:.1}%, {} perfect, {} at zero\n\n",
            self.summary.attempts, self.summary.mean_score, self.summary.perfect, self.summary.zero
        ));

        if !self.summary.per_exercise.is_empty() {
            md.push_str("| Exercise | Attempts | Mean | Best |\n");
            md.push_str("|----------|----------|------|------|\n");
            for stats in self.summary.per_exercise.values() {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {}% |\n",
                    stats.exercise_id, stats.attempts, stats.mean_score, stats.best_score
                ));
            }
        }

        md
    }
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize to JSON")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Evaluator;
    use crate::model::ExerciseContent;

    fn graded(exercise_id: &str, answers: [&str; 2]) -> AttemptRecord {
        let content = ExerciseContent::sentences(
            ["Le ___ mange une ___ rouge."],
            vec!["chat".into(), "pomme".into()],
        );
        let submission = Submission::from_answers(answers);
        let result = Evaluator::default().evaluate("", &content, &submission);
        AttemptRecord::new(exercise_id, submission, result)
    }

    fn summary() -> ExerciseSetSummary {
        ExerciseSetSummary {
            id: "francais-1".into(),
            name: "Français 1".into(),
            exercise_count: 1,
        }
    }

    #[test]
    fn attempt_json_roundtrip() {
        let record = graded("chat", ["chat", "banane"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts").join("a.json");

        record.save_json(&path).unwrap();
        let loaded = AttemptRecord::load_json(&path).unwrap();

        assert_eq!(loaded, record);
        assert_eq!(loaded.result.score, 50);
        assert_eq!(loaded.submission.get(1), "banane");
    }

    #[test]
    fn report_summarizes_attempts() {
        let report = GradingReport::new(
            summary(),
            vec![graded("chat", ["chat", "pomme"]), graded("chat", ["", ""])],
        );
        assert_eq!(report.summary.attempts, 2);
        assert_eq!(report.summary.perfect, 1);
        assert_eq!(report.summary.zero, 1);
    }

    #[test]
    fn report_json_roundtrip() {
        let report = GradingReport::new(summary(), vec![graded("chat", ["pomme", "chat"])]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradingReport::load_json(&path).unwrap();
        assert_eq!(loaded.exercise_set.id, "francais-1");
        assert_eq!(loaded.attempts.len(), 1);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn markdown_output() {
        let report = GradingReport::new(summary(), vec![graded("chat", ["chat", "x"])]);
        let md = report.to_markdown();
        assert!(md.contains("Français 1"));
        assert!(md.contains("| chat | 1 | 50.0% | 50% |"));
    }
}
