//! Configuration templates written by `lq init`.
//!
//! Both templates are live TOML spelling out the default settings, so a freshly written
//! file behaves exactly like having no file at all.

/// Which configuration file a template is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Project-local `.lq.toml`.
    Local,
    /// Global `~/.lq.toml`.
    Global,
}

impl Template {
    /// Returns the template text.
    pub fn contents(self) -> &'static str {
        match self {
            Self::Local => include_str!("../templates/config.toml"),
            Self::Global => include_str!("../templates/config-global.toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        QuerySettings,
        merge::{ParsedConfig, merge_configs},
        parse::parse_config,
    };

    fn merged(template: Template) -> QuerySettings {
        let parsed = ParsedConfig {
            path: PathBuf::from("/t/.lq.toml"),
            config: parse_config(template.contents()).unwrap(),
        };
        merge_configs(&[parsed]).unwrap().query
    }

    #[test]
    fn local_template_matches_defaults() {
        assert_eq!(merged(Template::Local), QuerySettings::default());
    }

    #[test]
    fn global_template_matches_defaults() {
        assert_eq!(merged(Template::Global), QuerySettings::default());
    }

    #[test]
    fn local_template_is_not_root() {
        let raw = parse_config(Template::Local.contents()).unwrap();
        assert_eq!(raw.root, Some(false));
    }
}
