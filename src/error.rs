//! Error taxonomy for manifest builds

use std::path::PathBuf;

/// Every failure is fatal to the build; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to walk {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid manifest {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
