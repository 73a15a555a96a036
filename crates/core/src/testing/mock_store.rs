//! In-memory workspace store for testing.

use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::workspace::{StoreError, Workspace, WorkspaceStore};

/// In-memory implementation of the WorkspaceStore trait.
///
/// Applies the same validation and timestamp rules as the YAML store.
/// Can be told to fail the next operation to exercise error paths.
#[derive(Debug, Default)]
pub struct MockWorkspaceStore {
    workspaces: Arc<Mutex<Vec<Workspace>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockWorkspaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with workspaces.
    pub fn with_workspaces(workspaces: Vec<Workspace>) -> Self {
        Self {
            workspaces: Arc::new(Mutex::new(workspaces)),
            fail_next: Arc::new(Mutex::new(false)),
        }
    }

    /// Make the next operation fail with an I/O error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        let mut fail = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
        if *fail {
            *fail = false;
            return Err(StoreError::Io {
                path: "mock://workspaces".into(),
                source: std::io::Error::other("simulated failure"),
            });
        }
        Ok(())
    }
}

impl WorkspaceStore for MockWorkspaceStore {
    fn load_workspaces(&self) -> Result<Vec<Workspace>, StoreError> {
        self.check_failure()?;
        Ok(self.workspaces.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_workspace(&self, mut workspace: Workspace) -> Result<Workspace, StoreError> {
        self.check_failure()?;
        workspace.validate()?;

        let mut workspaces = self.workspaces.lock().unwrap_or_else(|e| e.into_inner());
        workspace.updated_at = Utc::now();
        match workspaces.iter_mut().find(|w| w.id == workspace.id) {
            Some(existing) => {
                workspace.created_at = existing.created_at;
                *existing = workspace.clone();
            }
            None => workspaces.push(workspace.clone()),
        }
        Ok(workspace)
    }

    fn delete_workspace(&self, id: &str) -> Result<bool, StoreError> {
        self.check_failure()?;
        let mut workspaces = self.workspaces.lock().unwrap_or_else(|e| e.into_inner());
        let before = workspaces.len();
        workspaces.retain(|w| w.id != id);
        Ok(workspaces.len() != before)
    }
}
