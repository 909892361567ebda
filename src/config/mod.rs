//! Configuration for manifest builds
//!
//! Defaults reproduce the fixed blacklist of the release tooling. An optional
//! TOML file can override any field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "manifest.json";

/// How excluded directory names are compared against a file's directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DirMatch {
    /// Directory equals the name or lies beneath it
    #[default]
    Segment,
    /// Raw string prefix: `.git` also matches `.gitignore-data`
    LegacyPrefix,
}

impl std::fmt::Display for DirMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirMatch::Segment => write!(f, "segment"),
            DirMatch::LegacyPrefix => write!(f, "legacy-prefix"),
        }
    }
}

impl std::str::FromStr for DirMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "segment" => Ok(DirMatch::Segment),
            "legacy-prefix" | "legacy" | "prefix" => Ok(DirMatch::LegacyPrefix),
            _ => Err(format!("Invalid dir match: {}. Use: segment, legacy-prefix", s)),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Manifest file name, relative to the scan root
    pub output: String,
    pub dir_match: DirMatch,
    pub excluded_dirs: Vec<String>,
    /// Exact relative paths that never get an entry
    pub excluded_files: Vec<String>,
    /// Paths that receive the `{hash, overwrite: "only"}` form
    pub overwrite_only: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            dir_match: DirMatch::default(),
            excluded_dirs: vec![".git".to_string(), "mods".to_string()],
            excluded_files: vec![
                "build_manifest.py".to_string(),
                DEFAULT_OUTPUT.to_string(),
                "config.json".to_string(),
            ],
            overwrite_only: vec!["TeraProxy.bat".to_string(), "TeraProxyGUI.bat".to_string()],
        }
    }
}

impl BuilderConfig {
    /// Exact-match exclusions, always including the configured output file
    pub fn excluded_file_set(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.excluded_files.iter().map(String::as_str).collect();
        if !files.contains(&self.output.as_str()) {
            files.push(&self.output);
        }
        files
    }

    pub fn is_overwrite_only(&self, rel_path: &str) -> bool {
        self.overwrite_only.iter().any(|name| name == rel_path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Load configuration from disk, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<BuilderConfig> {
    let Some(path) = path else {
        return Ok(BuilderConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
}
