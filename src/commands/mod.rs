//! CLI commands for build-manifest

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::blacklist::Blacklist;
use crate::config::{load_config, BuilderConfig, DirMatch};
use crate::manifest::{build_with, read_manifest, write_manifest};
use crate::models::{HashEntry, Manifest};
use crate::walk::normalize_rel_path;

/// Options collected from the command line for a build
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub root: Option<PathBuf>,
    pub output: Option<String>,
    pub config: Option<PathBuf>,
    pub compact: bool,
    /// `segment` or `legacy-prefix`
    pub dir_match: Option<String>,
    pub legacy_prefix: bool,
    pub dry_run: bool,
}

/// Resolve the effective config: file values first, then CLI overrides
pub fn resolve_config(opts: &BuildOptions) -> Result<BuilderConfig> {
    let mut config = load_config(opts.config.as_deref())?;
    if let Some(output) = &opts.output {
        config.output = output.clone();
    }
    if let Some(mode) = &opts.dir_match {
        config.dir_match = mode.parse::<DirMatch>().map_err(|e| anyhow::anyhow!(e))?;
    }
    if opts.legacy_prefix {
        config.dir_match = DirMatch::LegacyPrefix;
    }
    Ok(config)
}

fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("Could not determine current directory"),
    }
}

/// Build the manifest for the root and write it beside the scanned files
pub fn build(opts: &BuildOptions) -> Result<Manifest> {
    let root = resolve_root(opts.root.as_deref())?;
    let config = resolve_config(opts)?;

    let mut blacklist = Blacklist::from_config(&config);
    if let Some(config_rel) = opts
        .config
        .as_deref()
        .and_then(|path| rel_to_root(&root, path))
    {
        blacklist.exclude_file(config_rel);
    }

    println!(
        "Building manifest for {} (dir match: {})...",
        root.display(),
        config.dir_match
    );
    let manifest = build_with(&root, &config, &blacklist)
        .with_context(|| format!("Failed to build manifest for {}", root.display()))?;

    if opts.dry_run {
        print!("{}", manifest.to_json(opts.compact)?);
        return Ok(manifest);
    }

    let output = root.join(&config.output);
    write_manifest(&manifest, &output, opts.compact)?;

    println!(
        "✓ Wrote {} entries ({} overwrite-only) to {}",
        manifest.len(),
        manifest.overwrite_only_count(),
        output.display()
    );
    Ok(manifest)
}

/// Print a summary of an existing manifest
pub fn show(root: Option<&Path>, output: Option<&str>, json: bool) -> Result<()> {
    let root = resolve_root(root)?;
    let path = root.join(output.unwrap_or(crate::config::DEFAULT_OUTPUT));
    let manifest = read_manifest(&path)?;

    if json {
        print!("{}", manifest.to_json(false)?);
        return Ok(());
    }

    println!("Manifest: {}", path.display());
    println!("  Entries:        {}", manifest.len());
    println!("  Overwrite-only: {}", manifest.overwrite_only_count());
    if manifest.is_empty() {
        return Ok(());
    }

    println!();
    println!("{:<16} {}", "HASH", "PATH");
    println!("{}", "-".repeat(60));
    for (path, entry) in &manifest.files {
        let marker = match entry {
            HashEntry::Plain(_) => "",
            HashEntry::Structured { .. } => " [overwrite: only]",
        };
        println!("{:<16} {}{}", truncate(entry.digest(), 16), path, marker);
    }
    Ok(())
}

/// Print the effective configuration as TOML
pub fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// The config file's manifest key, if it lives under the root
fn rel_to_root(root: &Path, path: &Path) -> Option<String> {
    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    normalize_rel_path(path.strip_prefix(&root).ok()?)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
