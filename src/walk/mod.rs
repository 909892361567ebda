//! Recursive file enumeration under the scan root

use std::fs;
use std::path::{Component, Path};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::blacklist::Blacklist;
use crate::error::BuildError;

/// Normalize a root-relative path into a slash-separated manifest key
///
/// Returns `None` for paths that escape the root, are absolute, or are empty.
pub fn normalize_rel_path(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Regular files, and symlinks whose target is a regular file
///
/// Links are never descended into. A dangling link still counts so that
/// hashing reports it instead of the file silently vanishing from the manifest.
fn is_file_entry(entry: &DirEntry) -> bool {
    if !entry.path_is_symlink() {
        return entry.file_type().is_file();
    }
    match fs::metadata(entry.path()) {
        Ok(meta) => meta.is_file(),
        Err(_) => true,
    }
}

/// List every regular file under `root` that survives the blacklist
///
/// Order is depth-first with entries sorted by name, so repeated runs agree.
pub fn list_files(root: &Path, blacklist: &Blacklist) -> Result<Vec<String>, BuildError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| BuildError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if !is_file_entry(&entry) {
            continue;
        }

        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let key = match normalize_rel_path(rel) {
            Some(key) => key,
            None => return Err(BuildError::NonUtf8Path(entry.path().to_path_buf())),
        };

        if blacklist.is_blacklisted(&key) {
            debug!(path = %key, "skipping blacklisted file");
            continue;
        }
        files.push(key);
    }

    Ok(files)
}
