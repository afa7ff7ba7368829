//! Configuration handling for lexprep.
//!
//! Loaded from `config.toml` in the user config directory. Every field has a
//! default, so a missing file or a partial file is fine.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use lexprep_clean::CleanOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Text cleaning options
    #[serde(default)]
    pub cleaning: CleanOptions,

    /// Batch run behavior
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output directories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Directory scanned for PDF and DOCX files
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving `<stem>.txt`
    #[serde(default = "default_raw_output")]
    pub raw_output: PathBuf,

    /// Directory receiving `<stem>_cleaned.txt`
    #[serde(default = "default_cleaned_output")]
    pub cleaned_output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("data/raw/contracts")
}

fn default_raw_output() -> PathBuf {
    PathBuf::from("data/processed/extracted_text")
}

fn default_cleaned_output() -> PathBuf {
    PathBuf::from("data/processed/cleaned_text")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            raw_output: default_raw_output(),
            cleaned_output: default_cleaned_output(),
        }
    }
}

/// Batch run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Exit non-zero when any file fails
    #[serde(default)]
    pub fail_on_error: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level.
    pub fn max_level(&self) -> Result<Level> {
        self.level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.level))
    }
}

impl Config {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file, or from the default location when `None`.
    ///
    /// An explicit file must exist.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(&path),
            None => Self::load(),
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse TOML configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.logging.max_level()?;
        Ok(config)
    }

    /// Default config file location.
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Commented sample configuration.
    pub fn sample_toml() -> &'static str {
        r#"# lexprep configuration

[paths]
# Directory scanned recursively for .pdf and .docx files
input = "data/raw/contracts"
# Raw extracted text, one <stem>.txt per source
raw_output = "data/processed/extracted_text"
# Cleaned text, one <stem>_cleaned.txt per source
cleaned_output = "data/processed/cleaned_text"

[cleaning]
# Collapse the double spaces left behind by removed boilerplate
collapse_after_strip = false

[run]
# Exit with a non-zero status when any file fails
fail_on_error = false

[logging]
level = "info"
"#
    }
}

/// Get the config directory for lexprep.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("LEXPREP_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "lexprep").map(|dirs| dirs.config_dir().to_path_buf())
}
