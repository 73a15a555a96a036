//! Types for the workspace orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that prevent a workspace launch from starting.
///
/// Item failures are never reported here; they end up in the launch report.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A launch of this workspace is already in progress.
    #[error("workspace is already launching: {0}")]
    AlreadyLaunching(String),

    /// The requested preset does not exist in the workspace.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// The task running the launch panicked or was aborted.
    #[error("launch task failed: {0}")]
    TaskFailed(String),
}

impl OrchestratorError {
    /// Whether the launch may succeed if requested again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AlreadyLaunching(_))
    }
}

/// Current status of the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorStatus {
    /// Ids of workspaces with a launch in progress, sorted.
    pub launching: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_status_default() {
        let status = OrchestratorStatus::default();
        assert!(status.launching.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = OrchestratorError::AlreadyLaunching("ws-1".to_string());
        assert_eq!(err.to_string(), "workspace is already launching: ws-1");
        assert!(err.is_retryable());

        let err = OrchestratorError::PresetNotFound("Quick".to_string());
        assert_eq!(err.to_string(), "preset not found: Quick");
        assert!(!err.is_retryable());

        let err = OrchestratorError::TaskFailed("panicked".to_string());
        assert_eq!(err.to_string(), "launch task failed: panicked");
        assert!(!err.is_retryable());
    }
}
