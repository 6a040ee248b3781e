//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when persisting to the file store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read.
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The store file could not be written.
    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings.
    #[error("store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}
