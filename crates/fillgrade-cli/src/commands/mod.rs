pub mod classify;
pub mod evaluate;
pub mod grade;
pub mod init;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use fillgrade_core::config::load_config_from;
use fillgrade_core::engine::Evaluator;

/// Build an evaluator from an explicit config file or the default locations.
pub fn evaluator_from(config_path: Option<&Path>) -> Result<Evaluator> {
    let config = load_config_from(config_path).context("failed to load configuration")?;
    Ok(Evaluator::new(&config))
}
