//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the OS-facing and storage
//! traits, allowing launch sequences to be tested without opening anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use workdeck_core::testing::{fixtures, MockLaunchPrimitive, MockWorkspaceStore};
//!
//! let primitive = MockLaunchPrimitive::new();
//! let store = MockWorkspaceStore::with_workspaces(vec![fixtures::dev_workspace()]);
//!
//! // Configure failures
//! primitive.fail_url("https://down.example").await;
//!
//! // Use in AppState...
//! ```

mod mock_primitive;
mod mock_store;

pub use mock_primitive::{MockLaunchPrimitive, PrimitiveCall};
pub use mock_store::MockWorkspaceStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::workspace::{Workspace, WorkspaceItem, WorkspacePreset};

    /// A browser item with a single URL.
    pub fn browser_item(name: &str, url: &str) -> WorkspaceItem {
        WorkspaceItem::browser(name, [url])
    }

    /// A folder item under the mock home directory.
    pub fn folder_item(name: &str) -> WorkspaceItem {
        WorkspaceItem::folder(name, format!("~/{}", name.to_lowercase().replace(' ', "-")))
    }

    /// A typical development workspace: editor, dev server docs and a project folder.
    pub fn dev_workspace() -> Workspace {
        Workspace::new("Web Dev")
            .with_item(
                WorkspaceItem::app("Editor", "/usr/bin/code")
                    .with_companion_folder("~/code/site")
                    .with_category("Editors"),
            )
            .with_item(
                WorkspaceItem::browser("Docs", ["http://localhost:3000", "https://docs.rs"])
                    .with_wait_secs(2.0)
                    .with_depends_on("Editor"),
            )
            .with_item(WorkspaceItem::folder("Project", "~/code/site"))
            .with_preset(WorkspacePreset {
                name: "Quick".to_string(),
                description: Some("Editor only".to_string()),
                item_names: vec!["Editor".to_string()],
            })
    }
}
