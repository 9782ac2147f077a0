//! The `fillgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use fillgrade_core::parser;

pub fn execute(exercise_set_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let evaluator = super::evaluator_from(config_path.as_deref())?;
    let sets = parser::load_exercise_sets(&exercise_set_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        println!("Exercise set: {} ({} exercises)", set.name, set.exercises.len());

        let warnings = parser::validate_exercise_set(set, &evaluator);
        for w in &warnings {
            let prefix = w
                .exercise_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All exercise sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
