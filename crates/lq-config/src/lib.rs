//! Configuration system for lq.
//!
//! lq uses TOML configuration files named `.lq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.lq.toml`
//! files found, then loading `~/.lq.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use lq_query::Operator;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawQuerySettings, parse_config_file, parse_config_str};
use serde::Serialize;
pub use templates::Template;

/// Top-level merged configuration for lq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query construction settings.
    pub query: QuerySettings,
    /// Files that contributed to this configuration, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.lq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableConfig {
            query: SerializableQuerySettings::from(&self.query),
        };
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// Settings that shape queries built from documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySettings {
    /// Operator joining top-level clauses.
    pub operator: Operator,
    /// Default operator for term collections.
    pub collection_operator: Operator,
    /// Field applied to clauses without one; empty for the engine default field.
    pub default_field: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            operator: Operator::And,
            collection_operator: Operator::Or,
            default_field: String::new(),
        }
    }
}

/// TOML shape of the effective configuration.
#[derive(Serialize)]
struct SerializableConfig {
    /// Query construction settings.
    query: SerializableQuerySettings,
}

/// Query settings with operators spelled as keywords.
#[derive(Serialize)]
struct SerializableQuerySettings {
    /// Operator joining top-level clauses.
    operator: &'static str,
    /// Default operator for term collections.
    collection_operator: &'static str,
    /// Field applied to clauses without one.
    default_field: String,
}

impl From<&QuerySettings> for SerializableQuerySettings {
    fn from(settings: &QuerySettings) -> Self {
        Self {
            operator: settings.operator.as_str(),
            collection_operator: settings.collection_operator.as_str(),
            default_field: settings.default_field.clone(),
        }
    }
}
