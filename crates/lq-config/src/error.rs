//! Error types for lq configuration.

use std::io;
use std::path::PathBuf;

use lq_query::QueryError;
use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A setting holds a value the query builder rejects.
    #[error("invalid value for {key} in {path}: {source}")]
    InvalidSetting {
        /// Path to the file containing the setting.
        path: PathBuf,
        /// Dotted key of the setting, e.g. `query.operator`.
        key: &'static str,
        /// Underlying validation error.
        source: QueryError,
    },
}

impl ConfigError {
    /// Returns a hint for fixing the offending setting, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSetting { source, .. } => source.suggestion(),
            _ => None,
        }
    }
}
