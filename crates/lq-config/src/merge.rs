//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, validating values
//! as they are applied.

use std::path::{Path, PathBuf};

use lq_query::Operator;

use crate::{
    Config, ConfigError, QuerySettings,
    parse::{RawConfig, RawQuerySettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// CWD), lowest precedence last (global config). For each setting the first defined value
/// wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut query = QuerySettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.query {
            apply_raw_query_settings(&mut query, raw, &parsed.path)?;
        }
    }

    Ok(Config {
        query,
        files: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Applies raw query settings to `result`, overwriting any present values.
fn apply_raw_query_settings(
    result: &mut QuerySettings,
    raw: &RawQuerySettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = &raw.operator {
        result.operator = parse_operator(v, "query.operator", path)?;
    }
    if let Some(v) = &raw.collection_operator {
        result.collection_operator = parse_operator(v, "query.collection_operator", path)?;
    }
    if let Some(v) = &raw.default_field {
        result.default_field = v.trim().to_string();
    }
    Ok(())
}

/// Parses an operator setting, attributing failures to `key` in `path`.
fn parse_operator(value: &str, key: &'static str, path: &Path) -> Result<Operator, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidSetting {
            path: path.to_path_buf(),
            key,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.query.operator, Operator::And);
        assert_eq!(config.query.collection_operator, Operator::Or);
        assert!(config.query.default_field.is_empty());
        assert!(config.files.is_empty());
    }

    #[test]
    fn test_closest_wins() {
        let configs = [
            parsed("/work/project/.lq.toml", "[query]\noperator = \"or\"\n"),
            parsed(
                "/work/.lq.toml",
                "[query]\noperator = \"AND\"\ndefault_field = \"body\"\n",
            ),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.query.operator, Operator::Or);
        assert_eq!(config.query.default_field, "body");
        assert_eq!(config.files[0], PathBuf::from("/work/project/.lq.toml"));
        assert_eq!(config.files.len(), 2);
    }

    #[test]
    fn test_default_field_trimmed() {
        let configs = [parsed("/a/.lq.toml", "[query]\ndefault_field = \"  title \"\n")];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.query.default_field, "title");
    }

    #[test]
    fn test_invalid_operator_reports_key_and_path() {
        let configs = [parsed("/a/.lq.toml", "[query]\ncollection_operator = \"XOR\"\n")];
        let err = merge_configs(&configs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("query.collection_operator"), "{msg}");
        assert!(msg.contains("/a/.lq.toml"), "{msg}");
        assert!(msg.contains("XOR"), "{msg}");
    }
}
