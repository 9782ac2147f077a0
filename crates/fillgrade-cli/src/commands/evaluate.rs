//! The `fillgrade evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use fillgrade_core::model::{EvaluationResult, Exercise, Submission, ANSWER_FIELD_PREFIX};
use fillgrade_core::parser::{self, ExerciseSet};
use fillgrade_core::report::AttemptRecord;

pub fn execute(
    exercise_set_path: PathBuf,
    exercise_id: String,
    fields: Vec<String>,
    answers: Option<String>,
    format: String,
    save: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let evaluator = super::evaluator_from(config_path.as_deref())?;
    let sets = parser::load_exercise_sets(&exercise_set_path)?;
    let exercise = find_exercise(&sets, &exercise_id)?;

    let submission = build_submission(&fields, answers.as_deref())?;
    let result = evaluator.evaluate_exercise(exercise, &submission);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_result(&exercise.id, &result),
    }

    if let Some(dir) = save {
        let record = AttemptRecord::new(&exercise.id, submission, result);
        let path = dir.join(format!("attempt-{}.json", record.id));
        record.save_json(&path)?;
        eprintln!("Attempt saved to: {}", path.display());
    }

    Ok(())
}

fn find_exercise<'a>(sets: &'a [ExerciseSet], id: &str) -> Result<&'a Exercise> {
    if let Some(exercise) = sets.iter().find_map(|set| set.exercise(id)) {
        return Ok(exercise);
    }
    match sets.iter().find_map(|set| set.rejected(id)) {
        Some(rejected) => {
            anyhow::bail!("exercise {id} has malformed content: {}", rejected.reason)
        }
        None => anyhow::bail!("exercise not found: {id}"),
    }
}

/// `--answers` fills blanks by position; `--field` entries then override by name.
fn build_submission(fields: &[String], answers: Option<&str>) -> Result<Submission> {
    let mut submission = match answers {
        Some(list) => Submission::from_answers(list.split(',')),
        None => Submission::new(),
    };

    for field in fields {
        let (name, value) = field
            .split_once('=')
            .with_context(|| format!("invalid field '{field}', expected NAME=VALUE"))?;
        let index = name
            .strip_prefix(ANSWER_FIELD_PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .with_context(|| format!("invalid field name '{name}', expected answer_<N>"))?;
        submission.set(index, value);
    }

    Ok(submission)
}

fn print_result(exercise_id: &str, result: &EvaluationResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Blank", "Sentence", "Answer", "Expected", "Status"]);

    for d in &result.details {
        table.add_row(vec![
            Cell::new(d.blank_index),
            Cell::new(
                d.sentence_index
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(&d.user_answer),
            Cell::new(&d.reference_answer),
            Cell::new(&d.status_message),
        ]);
    }

    println!("Exercise: {exercise_id} [{}]", result.kind);
    if !result.details.is_empty() {
        println!("{table}");
    }
    for notice in &result.notices {
        println!("Note: {notice}");
    }
    println!(
        "Score: {}% ({}/{} correct)",
        result.score, result.correct_count, result.total_blanks
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_override_positional_answers() {
        let submission = build_submission(
            &["answer_1=pomme".to_string(), "answer_3=x".to_string()],
            Some("chat,banane"),
        )
        .unwrap();
        assert_eq!(submission.get(0), "chat");
        assert_eq!(submission.get(1), "pomme");
        assert_eq!(submission.get(2), "");
        assert_eq!(submission.get(3), "x");
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(build_submission(&["answer_0".to_string()], None).is_err());
        assert!(build_submission(&["reponse_0=chat".to_string()], None).is_err());
    }
}
