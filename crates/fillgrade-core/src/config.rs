//! Engine configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::blanks::{DEFAULT_BLANK_MARKER, DEFAULT_DELIMITERS};
use crate::classifier::ClassifierRule;
use crate::feedback::DEFAULT_EMPTY_LABEL;

/// Environment variable overriding [`EngineConfig::blank_marker`].
pub const BLANK_MARKER_ENV: &str = "FILLGRADE_BLANK_MARKER";

/// Top-level fillgrade configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Marker that stands for a blank in authored text.
    #[serde(default = "default_blank_marker")]
    pub blank_marker: String,
    /// Characters padded with spaces before blanks are counted.
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<char>,
    /// Shown in feedback in place of an empty answer.
    #[serde(default = "default_empty_label")]
    pub empty_answer_label: String,
    /// Ordering-exercise detection.
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Classifier settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Rules added to the built-in table.
    #[serde(default)]
    pub extra_rules: Vec<ClassifierRule>,
}

fn default_blank_marker() -> String {
    DEFAULT_BLANK_MARKER.to_string()
}
fn default_delimiters() -> Vec<char> {
    DEFAULT_DELIMITERS.to_vec()
}
fn default_empty_label() -> String {
    DEFAULT_EMPTY_LABEL.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blank_marker: default_blank_marker(),
            delimiters: default_delimiters(),
            empty_answer_label: default_empty_label(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML config string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the marker can actually be found in padded text.
    ///
    /// Delimiters are padded with spaces before markers are counted, so a
    /// marker containing a delimiter would never match.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.blank_marker.is_empty(),
            "blank_marker must not be empty"
        );
        if let Some(c) = self.blank_marker.chars().find(|c| self.delimiters.contains(c)) {
            anyhow::bail!(
                "blank_marker `{}` contains delimiter `{c}`; remove it from `delimiters` \
                 or choose another marker",
                self.blank_marker
            );
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `fillgrade.toml` in the current directory
/// 2. `~/.config/fillgrade/config.toml`
///
/// Environment variable override: `FILLGRADE_BLANK_MARKER`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fillgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            EngineConfig::from_toml_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Ok(marker) = std::env::var(BLANK_MARKER_ENV) {
        if marker.is_empty() {
            tracing::warn!("ignoring empty {BLANK_MARKER_ENV}");
        } else {
            config.blank_marker = marker;
        }
    }

    config
        .validate()
        .with_context(|| format!("invalid {BLANK_MARKER_ENV}"))?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fillgrade"))
}
