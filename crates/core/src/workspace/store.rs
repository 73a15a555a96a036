//! Workspace storage trait and errors.

use std::path::PathBuf;

use thiserror::Error;

use super::error::ValidationError;
use super::types::Workspace;

/// Errors returned by workspace storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Failed to access workspace file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not match the expected schema.
    #[error("Invalid workspace file format: {0}")]
    InvalidFormat(String),

    /// The workspace being saved is invalid.
    #[error("Invalid workspace: {0}")]
    Validation(#[from] ValidationError),

    /// Serializing workspaces failed.
    #[error("Failed to serialize workspaces: {0}")]
    Serialize(String),
}

impl StoreError {
    /// Whether the operation may succeed if attempted again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Storage backend for workspace definitions.
///
/// The store reads and writes the full set of workspaces at once; there is
/// no partial update.
pub trait WorkspaceStore: Send + Sync {
    /// Load all workspaces. A missing backing file yields an empty list.
    fn load_workspaces(&self) -> Result<Vec<Workspace>, StoreError>;

    /// Get a workspace by id.
    fn get_workspace(&self, id: &str) -> Result<Option<Workspace>, StoreError> {
        Ok(self.load_workspaces()?.into_iter().find(|w| w.id == id))
    }

    /// Insert or replace a workspace. Returns the workspace as stored.
    fn save_workspace(&self, workspace: Workspace) -> Result<Workspace, StoreError>;

    /// Delete a workspace. Returns `false` if no workspace had that id.
    fn delete_workspace(&self, id: &str) -> Result<bool, StoreError>;
}
