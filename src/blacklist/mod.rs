//! Blacklist filter deciding which files get a manifest entry
//!
//! A file is excluded when:
//! - its directory matches an excluded directory name, or
//! - its full relative path equals an excluded file name.

use crate::config::{BuilderConfig, DirMatch};

#[derive(Debug, Clone)]
pub struct Blacklist {
    dirs: Vec<String>,
    files: Vec<String>,
    mode: DirMatch,
}

impl Blacklist {
    pub fn new(dirs: Vec<String>, files: Vec<String>, mode: DirMatch) -> Self {
        Self { dirs, files, mode }
    }

    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::new(
            config.excluded_dirs.clone(),
            config
                .excluded_file_set()
                .into_iter()
                .map(str::to_string)
                .collect(),
            config.dir_match,
        )
    }

    /// Add an extra exact-match exclusion (e.g. a config file under the root)
    pub fn exclude_file(&mut self, rel_path: impl Into<String>) {
        let rel_path = rel_path.into();
        if !self.files.contains(&rel_path) {
            self.files.push(rel_path);
        }
    }

    /// `rel_path` must already be normalized and slash-separated
    pub fn is_blacklisted(&self, rel_path: &str) -> bool {
        let (dir, _) = split_dir(rel_path);
        self.dirs.iter().any(|name| self.dir_matches(dir, name))
            || self.files.iter().any(|name| name == rel_path)
    }

    fn dir_matches(&self, dir: &str, name: &str) -> bool {
        match self.mode {
            DirMatch::LegacyPrefix => dir.starts_with(name),
            DirMatch::Segment => {
                dir == name
                    || dir
                        .strip_prefix(name)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Split a relative path into (directory, file name); root files have an empty directory
pub fn split_dir(rel_path: &str) -> (&str, &str) {
    match rel_path.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", rel_path),
    }
}
