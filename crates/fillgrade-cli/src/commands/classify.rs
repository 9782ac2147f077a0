//! The `fillgrade classify` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(description: String, config_path: Option<PathBuf>) -> Result<()> {
    let evaluator = super::evaluator_from(config_path.as_deref())?;
    let kind = evaluator.classifier().classify(&description);
    println!("{kind}");
    Ok(())
}
