//! Manifest assembly and serialization
//!
//! `build` runs the full pipeline (enumerate, filter, hash) in memory; the
//! result is only written once every file has been hashed.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::blacklist::Blacklist;
use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::hasher::hash_files;
use crate::models::Manifest;
use crate::walk::list_files;

impl Manifest {
    /// Serialize with a 2-space indent, or minified when `compact`
    pub fn to_json(&self, compact: bool) -> Result<String, BuildError> {
        let mut json = if compact {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        json.push('\n');
        Ok(json)
    }
}

/// Build the manifest for `root` using the default blacklist from `config`
pub fn build(root: &Path, config: &BuilderConfig) -> Result<Manifest, BuildError> {
    build_with(root, config, &Blacklist::from_config(config))
}

/// Build with an explicit blacklist (callers may add extra exclusions)
pub fn build_with(
    root: &Path,
    config: &BuilderConfig,
    blacklist: &Blacklist,
) -> Result<Manifest, BuildError> {
    let files = list_files(root, blacklist)?;
    info!(root = %root.display(), count = files.len(), "hashing files");
    let hashes = hash_files(root, &files, config)?;
    Ok(Manifest::new(hashes))
}

/// Write the manifest so that readers see either the old or the new file
///
/// Content goes to a temporary file beside `path` and is renamed over it.
pub fn write_manifest(manifest: &Manifest, path: &Path, compact: bool) -> Result<(), BuildError> {
    let json = manifest.to_json(compact)?;
    let write_err = |source: std::io::Error| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), entries = manifest.len(), "manifest written");
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Manifest, BuildError> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| BuildError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HashEntry;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    fn sample() -> Manifest {
        let mut files = IndexMap::new();
        files.insert("a.txt".to_string(), HashEntry::Plain("aa".to_string()));
        files.insert(
            "TeraProxy.bat".to_string(),
            HashEntry::overwrite_only("bb".to_string()),
        );
        Manifest::new(files)
    }

    #[test]
    fn test_pretty_json_layout() {
        let json = sample().to_json(false).unwrap();
        let expected = r#"{
  "files": {
    "a.txt": "aa",
    "TeraProxy.bat": {
      "hash": "bb",
      "overwrite": "only"
    }
  }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_compact_json_layout() {
        let json = sample().to_json(true).unwrap();
        assert_eq!(
            json,
            "{\"files\":{\"a.txt\":\"aa\",\"TeraProxy.bat\":{\"hash\":\"bb\",\"overwrite\":\"only\"}}}\n"
        );
    }

    #[test]
    fn test_empty_manifest_json() {
        let json = Manifest::default().to_json(false).unwrap();
        assert_eq!(json, "{\n  \"files\": {}\n}\n");
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.json");
        write_manifest(&sample(), &path, false).unwrap();

        assert_eq!(read_manifest(&path).unwrap(), sample());
        // Only the manifest remains; the temp file was renamed away
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_keeps_previous_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.json");
        write_manifest(&sample(), &path, false).unwrap();
        let before = fs::read(&path).unwrap();

        let bad = temp.path().join("missing-dir").join("manifest.json");
        let result = write_manifest(&Manifest::default(), &bad, false);
        assert!(matches!(result, Err(BuildError::Write { .. })));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_read_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.json");
        fs::write(&path, "{\"files\": [1, 2]}").unwrap();
        assert!(matches!(read_manifest(&path), Err(BuildError::Parse { .. })));
    }
}
