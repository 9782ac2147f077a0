//! The `fillgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("fillgrade.toml").exists() {
        println!("fillgrade.toml already exists, skipping.");
    } else {
        std::fs::write("fillgrade.toml", SAMPLE_CONFIG)?;
        println!("Created fillgrade.toml");
    }

    std::fs::create_dir_all("exercise-sets")?;
    let example_path = std::path::Path::new("exercise-sets/example.toml");
    if example_path.exists() {
        println!("exercise-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISE_SET)?;
        println!("Created exercise-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: fillgrade validate --exercise-set exercise-sets/example.toml");
    println!(
        "  2. Run: fillgrade evaluate --exercise-set exercise-sets/example.toml \
         --exercise chat --answers chat,pomme"
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fillgrade configuration

blank_marker = "___"
empty_answer_label = "(empty)"

# Extra phrases that mark an "arrange in order" exercise.
# Descending rules are always checked before ascending ones.
# [[classifier.extra_rules]]
# direction = "descending"
# phrase = "à rebours"
"#;

const EXAMPLE_EXERCISE_SET: &str = r#"[exercise_set]
id = "example"
name = "Example Exercise Set"
description = "A small exercise set to get started"

[[exercises]]
id = "chat"
description = "Complète la phrase avec les mots proposés."

[exercises.content]
sentences = ["Le ___ mange une ___ rouge."]
words = ["chat", "pomme"]

[[exercises]]
id = "decimaux"
description = "Range les nombres dans l'ordre croissant."

[exercises.content]
text = "___ < ___ < ___ < ___ < ___"
answers = ["0.9", "0.85", "0.08", "0.8", "0.18"]
"#;
