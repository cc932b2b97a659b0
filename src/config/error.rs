//! Errors raised while reading or writing `config.yml`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file path not set")]
    FilePathNotSet,

    #[error("Cannot locate the home directory for the default configuration")]
    HomeDirectoryNotFound,

    #[error("Cannot read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid configuration: {message}")]
    InvalidFile { path: PathBuf, message: String },

    #[error("Cannot encode configuration: {0}")]
    SerializationFailed(String),

    /// Hotkey string could not be parsed
    #[error("Invalid hotkey '{0}'")]
    InvalidHotkey(String),
}
