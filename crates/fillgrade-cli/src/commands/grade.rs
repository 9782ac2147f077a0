//! The `fillgrade grade` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use fillgrade_core::model::Submission;
use fillgrade_core::parser::{self, ExerciseSetSummary};
use fillgrade_core::report::{AttemptRecord, GradingReport};

/// One attempt as exported by the web front end.
#[derive(Debug, Deserialize)]
struct RawAttempt {
    exercise_id: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

pub fn execute(
    exercise_set_path: PathBuf,
    attempts_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let evaluator = super::evaluator_from(config_path.as_deref())?;
    let sets = parser::load_exercise_sets(&exercise_set_path)?;
    if sets.is_empty() {
        anyhow::bail!("no exercise sets found in {}", exercise_set_path.display());
    }
    let raw_attempts = load_attempts(&attempts_path)?;

    let mut records = Vec::with_capacity(raw_attempts.len());
    let mut skipped = 0usize;

    for (i, attempt) in raw_attempts.into_iter().enumerate() {
        let exercise = sets.iter().find_map(|set| set.exercise(&attempt.exercise_id));
        let Some(exercise) = exercise else {
            tracing::warn!(
                "attempt {i}: exercise '{}' not found, skipping",
                attempt.exercise_id
            );
            skipped += 1;
            continue;
        };
        let submission = Submission::from_form_fields(attempt.fields);
        let result = evaluator.evaluate_exercise(exercise, &submission);
        records.push(AttemptRecord::new(&exercise.id, submission, result));
    }

    let report = GradingReport::new(ExerciseSetSummary::combined(&sets), records);

    match format.as_str() {
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_summary(&report),
    }

    if skipped > 0 {
        eprintln!("{skipped} attempt(s) skipped");
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn load_attempts(path: &Path) -> Result<Vec<RawAttempt>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attempts file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attempts file: {}", path.display()))
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Exercise", "Kind", "Correct", "Score"]);

    for (i, record) in report.attempts.iter().enumerate() {
        let result = &record.result;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&record.exercise_id),
            Cell::new(result.kind),
            Cell::new(format!("{}/{}", result.correct_count, result.total_blanks)),
            Cell::new(format!("{}%", result.score)),
        ]);
    }

    println!("Exercise set: {}", report.exercise_set.name);
    println!("{table}");
    println!(
        "Graded {} attempt(s): mean {:.1}%, {} perfect, {} at zero",
        report.summary.attempts,
        report.summary.mean_score,
        report.summary.perfect,
        report.summary.zero
    );
}
