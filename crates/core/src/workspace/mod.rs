//! Workspace definitions and their storage.
//!
//! A workspace is an ordered list of items (applications, browser URL sets,
//! folders) that are started together. Definitions are persisted as a single
//! YAML file:
//!
//! ```yaml
//! schemaVersion: 1
//! workspaces:
//!   - id: 6f1c2f0e-8d3a-4a51-9d8e-0b7c1c1e2a11
//!     name: Frontend
//!     items:
//!       - type: app
//!         name: Editor
//!         path: /usr/bin/code
//!         folder: ~/projects/site
//!       - type: browser
//!         name: Preview
//!         urls: [http://localhost:3000]
//!         waitTime: 3
//!         dependsOn: Editor
//!     createdAt: 2024-01-01T00:00:00Z
//!     updatedAt: 2024-01-01T00:00:00Z
//! ```

mod error;
mod store;
mod types;
mod yaml_store;

pub use error::ValidationError;
pub use store::{StoreError, WorkspaceStore};
pub use types::{ItemKind, Workspace, WorkspaceItem, WorkspacePreset};
pub use yaml_store::{YamlWorkspaceStore, SCHEMA_VERSION};
