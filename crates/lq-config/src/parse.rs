//! Configuration file parsing.
//!
//! Parses individual `.lq.toml` files into `RawConfig` structures that keep every field
//! optional until the files are merged.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Query construction settings.
    pub query: Option<RawQuerySettings>,
}

/// Raw query settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawQuerySettings {
    /// Operator joining top-level clauses.
    pub operator: Option<String>,
    /// Default operator for term collections.
    pub collection_operator: Option<String>,
    /// Field applied to clauses without one.
    pub default_field: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string attributed to a placeholder path.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, ConfigError> {
    parse_config_str(contents, Path::new("<test>"))
}

/// Returns true if the file at `path` sets `root = true`. Unreadable or malformed files
/// count as not root; loading them later reports the error.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
