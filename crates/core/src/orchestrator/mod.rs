//! Workspace launch orchestrator.
//!
//! The orchestrator sequences a workspace's items:
//! - **Order**: strictly the stored list order, one item at a time
//! - **Timing**: an item's `waitTime` delays that item, never the caller
//! - **Failures**: best effort, every item gets a chance to run
//!
//! Launches of different workspaces run concurrently; a workspace can only
//! have one launch in flight, which can be cancelled.

mod cancel;
mod config;
mod runner;
mod types;

pub use cancel::{cancellation, CancelHandle, CancelSignal};
pub use config::{DependencyPolicy, OrchestratorConfig};
pub use runner::WorkspaceOrchestrator;
pub use types::{OrchestratorError, OrchestratorStatus};
