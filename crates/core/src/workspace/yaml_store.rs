//! YAML file workspace store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::store::{StoreError, WorkspaceStore};
use super::types::Workspace;

/// Current version of the workspace file layout.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspacesFile {
    schema_version: u32,
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

/// Workspace store backed by a single YAML file.
///
/// Every write rewrites the whole file through a temporary sibling file and
/// a rename. Writers are serialized by an internal lock.
#[derive(Debug)]
pub struct YamlWorkspaceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlWorkspaceStore {
    /// Create a store for the given file. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_file(&self) -> Result<Vec<Workspace>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Workspace file {:?} not found, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: WorkspacesFile = serde_yaml_ng::from_str(&content)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

        if file.schema_version > SCHEMA_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "unsupported schema version {} (newest supported is {})",
                file.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(file.workspaces)
    }

    fn write_file(&self, workspaces: Vec<Workspace>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let file = WorkspacesFile {
            schema_version: SCHEMA_VERSION,
            workspaces,
        };
        let content =
            serde_yaml_ng::to_string(&file).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl WorkspaceStore for YamlWorkspaceStore {
    fn load_workspaces(&self) -> Result<Vec<Workspace>, StoreError> {
        self.read_file()
    }

    fn save_workspace(&self, mut workspace: Workspace) -> Result<Workspace, StoreError> {
        workspace.validate()?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut workspaces = self.read_file()?;
        let now = Utc::now();

        match workspaces.iter_mut().find(|w| w.id == workspace.id) {
            Some(existing) => {
                workspace.created_at = existing.created_at;
                workspace.updated_at = now;
                *existing = workspace.clone();
                info!("Updated workspace {} ({})", workspace.name, workspace.id);
            }
            None => {
                workspace.updated_at = now;
                workspaces.push(workspace.clone());
                info!("Created workspace {} ({})", workspace.name, workspace.id);
            }
        }

        self.write_file(workspaces)?;
        Ok(workspace)
    }

    fn delete_workspace(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let workspaces = self.read_file()?;
        let before = workspaces.len();
        let remaining: Vec<Workspace> = workspaces.into_iter().filter(|w| w.id != id).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.write_file(remaining)?;
        info!("Deleted workspace {}", id);
        Ok(true)
    }
}
