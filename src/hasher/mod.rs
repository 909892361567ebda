//! SHA-256 content hashing for manifest entries

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::models::HashEntry;

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Read the whole file and hash it
pub fn hash_file(path: &Path) -> Result<String, BuildError> {
    let data = fs::read(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha256_hex(&data))
}

/// Hash each listed file, in order, wrapping reserved names
///
/// Stops at the first unreadable file; callers never see a partial map.
pub fn hash_files(
    root: &Path,
    files: &[String],
    config: &BuilderConfig,
) -> Result<IndexMap<String, HashEntry>, BuildError> {
    let mut hashes = IndexMap::with_capacity(files.len());

    for rel in files {
        let digest = hash_file(&root.join(rel))?;
        debug!(path = %rel, %digest, "hashed");

        let entry = if config.is_overwrite_only(rel) {
            HashEntry::overwrite_only(digest)
        } else {
            HashEntry::Plain(digest)
        };
        hashes.insert(rel.clone(), entry);
    }

    Ok(hashes)
}
