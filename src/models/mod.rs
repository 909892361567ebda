//! Data models for the integrity manifest
//!
//! These mirror the JSON document consumed by the updater:
//! `{ "files": { "<path>": "<sha256>" | { "hash": "<sha256>", "overwrite": "only" } } }`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Update policy attached to structured entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Replace the file wholesale, never patch it
    Only,
}

/// A single file's entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HashEntry {
    /// Bare lowercase hex digest
    Plain(String),
    Structured {
        hash: String,
        overwrite: OverwritePolicy,
    },
}

impl HashEntry {
    pub fn overwrite_only(hash: String) -> Self {
        HashEntry::Structured {
            hash,
            overwrite: OverwritePolicy::Only,
        }
    }

    /// The hex digest regardless of entry form
    pub fn digest(&self) -> &str {
        match self {
            HashEntry::Plain(hash) => hash,
            HashEntry::Structured { hash, .. } => hash,
        }
    }

    pub fn is_overwrite_only(&self) -> bool {
        matches!(
            self,
            HashEntry::Structured {
                overwrite: OverwritePolicy::Only,
                ..
            }
        )
    }
}

/// The full manifest document
///
/// `files` keeps walk order so regenerated manifests diff cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub files: IndexMap<String, HashEntry>,
}

impl Manifest {
    pub fn new(files: IndexMap<String, HashEntry>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&HashEntry> {
        self.files.get(path)
    }

    /// Number of entries carrying the overwrite-only wrapper
    pub fn overwrite_only_count(&self) -> usize {
        self.files.values().filter(|e| e.is_overwrite_only()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4";

    #[test]
    fn test_plain_entry_serializes_as_string() {
        let entry = HashEntry::Plain(DIGEST.to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::Value::String(DIGEST.to_string()));
    }

    #[test]
    fn test_structured_entry_shape() {
        let entry = HashEntry::overwrite_only(DIGEST.to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "hash": DIGEST, "overwrite": "only" }));
        assert!(entry.is_overwrite_only());
        assert_eq!(entry.digest(), DIGEST);
    }

    #[test]
    fn test_untagged_entry_parses_both_forms() {
        let plain: HashEntry = serde_json::from_str(&format!("\"{}\"", DIGEST)).unwrap();
        assert_eq!(plain, HashEntry::Plain(DIGEST.to_string()));
        assert!(!plain.is_overwrite_only());

        let structured: HashEntry =
            serde_json::from_str(&format!(r#"{{"hash":"{}","overwrite":"only"}}"#, DIGEST)).unwrap();
        assert!(structured.is_overwrite_only());
    }

    #[test]
    fn test_unknown_overwrite_policy_rejected() {
        let result: Result<HashEntry, _> =
            serde_json::from_str(r#"{"hash":"abc","overwrite":"merge"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_keeps_insertion_order() {
        let mut files = IndexMap::new();
        files.insert("z.txt".to_string(), HashEntry::Plain("1".to_string()));
        files.insert("a.txt".to_string(), HashEntry::Plain("2".to_string()));
        let manifest = Manifest::new(files);

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.find("z.txt").unwrap() < json.find("a.txt").unwrap());
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.overwrite_only_count(), 0);
    }
}
