//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

/// How `dependsOn` is treated during a workspace launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyPolicy {
    /// List order only; `dependsOn` has no runtime effect.
    #[default]
    Advisory,
    /// Skip an item whose dependency was not launched successfully earlier
    /// in the same launch. List order is never rearranged.
    Enforce,
}

/// Configuration for the workspace launch orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Runtime treatment of `dependsOn`.
    #[serde(default)]
    pub dependency_policy: DependencyPolicy,

    /// Upper bound for a single item's `waitTime` (seconds).
    /// Longer waits are clamped to this value.
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: u64,
}

fn default_max_wait() -> u64 {
    300 // 5 minutes
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            dependency_policy: DependencyPolicy::default(),
            max_wait_secs: default_max_wait(),
        }
    }
}

impl OrchestratorConfig {
    /// Sets the dependency policy.
    pub fn with_dependency_policy(mut self, policy: DependencyPolicy) -> Self {
        self.dependency_policy = policy;
        self
    }

    /// Sets the wait ceiling.
    pub fn with_max_wait_secs(mut self, secs: u64) -> Self {
        self.max_wait_secs = secs;
        self
    }
}
