//! Persistence-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing saved item statuses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read the state file
    #[error("Failed to read state from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the state file
    #[error("Failed to write state to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// State file is not valid JSON for any known schema
    #[error("Failed to parse saved state: {0}")]
    ParseFailed(String),

    /// State file was written by an unknown schema version
    #[error("Unsupported state schema version {0}")]
    UnsupportedVersion(u32),

    /// Failed to serialize state
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),
}
