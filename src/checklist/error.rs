//! Checklist definition error types.

use std::path::PathBuf;

/// Errors that can occur while loading or validating a checklist tree.
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    /// Failed to read the definition file
    #[error("Failed to read checklists from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Definition is not valid YAML for a checklist tree
    #[error("Failed to parse checklists: {0}")]
    ParseFailed(String),

    /// Definition contains no categories
    #[error("Checklist definition contains no categories")]
    NoCategories,

    /// An identifier is empty
    #[error("Empty identifier in {parent}")]
    EmptyId { parent: String },

    /// An identifier appears twice under the same parent
    #[error("Duplicate identifier '{id}' in {parent}")]
    DuplicateId { id: String, parent: String },

    /// A resets-group category carries checklists no screen can open
    #[error("Category '{id}' is in the resets group but has checklists")]
    UnreachableCategory { id: String },
}
