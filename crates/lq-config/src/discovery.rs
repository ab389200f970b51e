//! Locating `.lq.toml` files.
//!
//! Every ancestor of the working directory may hold a config file. Files closer to the
//! working directory shadow farther ones, and `~/.lq.toml` sits underneath them all.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lq.toml";

/// Lists the configuration files that apply to `cwd`, highest precedence first.
///
/// A file with `root = true` ends the search; neither its ancestors nor the global file
/// are returned after it.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let root = is_root_config(&candidate);
        debug!(path = %candidate.display(), root, "config file");
        configs.push(candidate);
        if root {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file() && !configs.contains(p)) {
        debug!(path = %global.display(), "global config file");
        configs.push(global);
    }
    configs
}

/// Returns `~/.lq.toml`, or `None` when there is no home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns true if `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Builds a directory tree. Entries are `(dir, Some(config))` to place a config file in
    /// `dir`, or `(dir, None)` for a bare directory.
    fn tree(entries: &[(&str, Option<&str>)]) -> TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for (dir, config) in entries {
            let dir = tmp.path().join(dir);
            fs::create_dir_all(&dir).unwrap();
            if let Some(contents) = config {
                fs::write(dir.join(CONFIG_FILENAME), contents).unwrap();
            }
        }
        tmp
    }

    /// Runs discovery from `rel` and returns the hits relative to the tree, ignoring the
    /// machine's own global config.
    fn discover(tmp: &TempDir, rel: &str) -> Vec<String> {
        discover_config_files(&tmp.path().join(rel))
            .into_iter()
            .filter(|p| !is_global_config(p))
            .map(|p| {
                let dir = p.parent().unwrap().strip_prefix(tmp.path()).unwrap();
                dir.display().to_string()
            })
            .collect()
    }

    #[test]
    fn nothing_found() {
        let tmp = tree(&[("a/b", None)]);
        assert!(discover(&tmp, "a/b").is_empty());
    }

    #[test]
    fn closest_first() {
        let tmp = tree(&[("", Some("")), ("a", Some("")), ("a/b/c", None)]);
        assert_eq!(discover(&tmp, "a/b/c"), ["a", ""]);
    }

    #[test]
    fn config_in_cwd_is_found() {
        let tmp = tree(&[("", Some("[query]\n"))]);
        assert_eq!(discover(&tmp, ""), [""]);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tmp = tree(&[(CONFIG_FILENAME, None), ("sub", None)]);
        assert!(discover(&tmp, "sub").is_empty());
    }

    #[test]
    fn root_stops_search_and_skips_global() {
        let tmp = tree(&[
            ("", Some("")),
            ("proj", Some("root = true\n")),
            ("proj/sub", Some("")),
            ("proj/sub/deep", None),
        ]);

        let all = discover_config_files(&tmp.path().join("proj/sub/deep"));
        assert_eq!(all.len(), 2);
        assert_eq!(discover(&tmp, "proj/sub/deep"), ["proj/sub", "proj"]);
    }

    #[test]
    fn root_false_keeps_searching() {
        let tmp = tree(&[("", Some("")), ("proj", Some("root = false\n")), ("proj/src", None)]);
        assert_eq!(discover(&tmp, "proj/src"), ["proj", ""]);
    }

    #[test]
    fn unparseable_file_does_not_stop_search() {
        let tmp = tree(&[("", Some("")), ("proj", Some("root = [\n"))]);
        assert_eq!(discover(&tmp, "proj"), ["proj", ""]);
    }

    #[test]
    fn global_path_recognized() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.lq.toml")));
    }
}
