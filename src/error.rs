//! Top-level error type.
//!
//! Each subsystem keeps its own error enum; they meet here so startup code can
//! use `?` across config, checklist and store calls.

pub use crate::checklist::ChecklistError;
pub use crate::config::ConfigError;
pub use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Checklist error: {0}")]
    Checklist(#[from] ChecklistError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or drawing failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A global logger was already installed
    #[error("Logger error: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;
