//! Validation errors for workspace items and workspaces.

use thiserror::Error;

use super::types::ItemKind;

/// A workspace item or workspace is missing data required for its kind.
///
/// Validation errors are always caused by the stored data, never by the
/// environment, so they are never retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The item `type` tag is not one of the known kinds.
    #[error("Unknown item type: {0}")]
    UnknownKind(String),

    /// A browser item without any URL.
    #[error("Browser item \"{item}\" has no URLs")]
    MissingUrls { item: String },

    /// An app or folder item without a target path.
    #[error("{} item \"{item}\" has no path", .kind.label())]
    MissingPath { kind: ItemKind, item: String },

    /// An item with an empty name.
    #[error("Item name cannot be empty")]
    EmptyItemName,

    /// Two items in the same workspace share a name.
    #[error("Duplicate item name: {0}")]
    DuplicateItemName(String),

    /// A negative or non-finite startup delay.
    #[error("Item \"{item}\" has an invalid wait time: {value}")]
    InvalidWaitTime { item: String, value: f64 },

    /// The workspace id is not a UUID.
    #[error("Workspace id is not a valid UUID: {0}")]
    InvalidWorkspaceId(String),

    /// The workspace has an empty name.
    #[error("Workspace name cannot be empty")]
    EmptyWorkspaceName,

    /// A preset references an item that does not exist.
    #[error("Preset \"{preset}\" references unknown item \"{item}\"")]
    UnknownPresetItem { preset: String, item: String },
}

impl ValidationError {
    /// Validation errors describe bad data and never succeed on retry.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
