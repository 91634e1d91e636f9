//! Pipeline configuration, persisted as TOML.
//!
//! Every field has a sensible default so an empty file (or no file at all)
//! yields a working pipeline; CLI flags override individual values.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::DEFAULT_SOURCE;

/// Errors from configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(bayaz::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(bayaz::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(bayaz::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Named remote source to mirror.
    #[serde(default = "default_source")]
    pub source: String,
    /// Number of book ordinals to fetch (ids `001..`).
    #[serde(default = "default_book_count")]
    pub book_count: u32,
    /// Language selected for retrieval-ready flattening.
    #[serde(default = "default_language")]
    pub target_language: String,
    /// Pause between network requests, in milliseconds.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Root directory of the local mirror.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Directory for curated outputs.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.into()
}
fn default_book_count() -> u32 {
    11
}
fn default_language() -> String {
    "en".into()
}
fn default_rate_limit_ms() -> u64 {
    500
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_data_dir() -> String {
    "data".into()
}
fn default_out_dir() -> String {
    "data/processed".into()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            book_count: default_book_count(),
            target_language: default_language(),
            rate_limit_ms: default_rate_limit_ms(),
            timeout_secs: default_timeout_secs(),
            data_dir: default_data_dir(),
            out_dir: default_out_dir(),
        }
    }
}

impl PipelineConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
