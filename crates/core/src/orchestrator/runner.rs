//! Workspace launch orchestrator implementation.
//!
//! Walks an item list strictly in order:
//! - waits the item's `waitTime` (clamped, interruptible by cancellation)
//! - dispatches the item and records its outcome
//! - continues regardless of failures
//!
//! Then aggregates every outcome into a [`LaunchReport`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::launcher::{FailureKind, ItemDispatcher, LaunchOutcome, LaunchReport};
use crate::metrics;
use crate::workspace::{Workspace, WorkspaceItem};

use super::cancel::{cancellation, CancelHandle, CancelSignal};
use super::config::{DependencyPolicy, OrchestratorConfig};
use super::types::{OrchestratorError, OrchestratorStatus};

type InFlight = Arc<Mutex<HashMap<String, CancelHandle>>>;

/// Removes a workspace from the in-flight set when the launch ends.
struct InFlightGuard {
    workspace_id: String,
    in_flight: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.workspace_id);
    }
}

/// The workspace orchestrator - sequences item dispatch for a launch.
///
/// Holds no state between launches except the set of workspaces currently
/// launching, which is used to refuse overlapping launches of the same
/// workspace and to route cancellation.
#[derive(Clone)]
pub struct WorkspaceOrchestrator {
    config: OrchestratorConfig,
    dispatcher: ItemDispatcher,
    in_flight: InFlight,
}

impl WorkspaceOrchestrator {
    /// Create a new orchestrator.
    pub fn new(config: OrchestratorConfig, dispatcher: ItemDispatcher) -> Self {
        Self {
            config,
            dispatcher,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The orchestrator configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// The dispatcher used for every item.
    pub fn dispatcher(&self) -> &ItemDispatcher {
        &self.dispatcher
    }

    /// Launch one item immediately.
    ///
    /// No wait is applied and `dependsOn` is ignored.
    pub async fn launch_item(&self, item: &WorkspaceItem) -> LaunchOutcome {
        debug!("Single-item launch: {}", item.name);
        self.dispatcher.launch(item).await
    }

    /// Launch a workspace, or one of its presets.
    ///
    /// Fails only when the workspace is already launching or the preset does
    /// not exist; item failures are reported in the returned report.
    ///
    /// The launch runs on its own task. Dropping the returned future does not
    /// stop it; only [`WorkspaceOrchestrator::cancel`] does.
    pub async fn launch_workspace(
        &self,
        workspace: &Workspace,
        preset: Option<&str>,
    ) -> Result<LaunchReport, OrchestratorError> {
        let items = match preset {
            Some(name) => workspace
                .preset_items(name)
                .ok_or_else(|| OrchestratorError::PresetNotFound(name.to_string()))?,
            None => workspace.items.clone(),
        };

        let (guard, signal) = self.register(&workspace.id)?;

        info!(
            workspace = %workspace.name,
            id = %workspace.id,
            preset = preset.unwrap_or("-"),
            "Launching {} items",
            items.len()
        );

        let orchestrator = self.clone();
        let task = tokio::spawn(async move {
            let _guard = guard;
            orchestrator.launch_items(&items, &signal).await
        });

        task.await.map_err(|e| {
            error!(id = %workspace.id, "Launch task failed: {}", e);
            OrchestratorError::TaskFailed(e.to_string())
        })
    }

    /// Launch an item list in order and aggregate the outcomes.
    ///
    /// Never fails. Every input item appears in the report, in input order.
    pub async fn launch_items(&self, items: &[WorkspaceItem], signal: &CancelSignal) -> LaunchReport {
        if items.is_empty() {
            return LaunchReport::empty();
        }

        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(items.len());
        // name -> launched successfully
        let mut attempted: HashMap<&str, bool> = HashMap::new();
        let mut cancelled = false;

        for item in items {
            if cancelled || signal.is_cancelled() || !self.wait_before(item, signal).await {
                cancelled = true;
                outcomes.push(LaunchOutcome::cancelled(item));
                continue;
            }

            if let Some(outcome) = self.check_dependency(item, &attempted) {
                warn!(
                    item = %item.name,
                    "Skipping item: {}",
                    outcome.error_message.as_deref().unwrap_or_default()
                );
                metrics::ITEM_LAUNCHES
                    .with_label_values(&[item.kind.as_str(), FailureKind::Dependency.as_str()])
                    .inc();
                attempted.insert(item.name.as_str(), false);
                outcomes.push(outcome);
                continue;
            }

            let outcome = self.dispatcher.launch(item).await;
            attempted.insert(item.name.as_str(), outcome.succeeded);
            outcomes.push(outcome);
        }

        let elapsed = started.elapsed();
        let report = LaunchReport::from_outcomes(outcomes, cancelled, elapsed.as_millis() as u64);

        let result = if report.cancelled {
            "cancelled"
        } else if report.all_succeeded() {
            "success"
        } else {
            "partial"
        };
        metrics::WORKSPACE_LAUNCHES.with_label_values(&[result]).inc();
        metrics::WORKSPACE_LAUNCH_DURATION
            .with_label_values(&[result])
            .observe(elapsed.as_secs_f64());

        info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            cancelled = report.cancelled,
            duration_ms = report.duration_ms,
            "Launch finished"
        );

        report
    }

    /// Cancel the in-flight launch of a workspace.
    ///
    /// Returns `false` if the workspace is not launching.
    pub fn cancel(&self, workspace_id: &str) -> bool {
        let in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        match in_flight.get(workspace_id) {
            Some(handle) => {
                info!("Cancelling launch of workspace {}", workspace_id);
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether a launch of this workspace is in progress.
    pub fn is_launching(&self, workspace_id: &str) -> bool {
        let in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.contains_key(workspace_id)
    }

    /// Current status.
    pub fn status(&self) -> OrchestratorStatus {
        let in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let mut launching: Vec<String> = in_flight.keys().cloned().collect();
        launching.sort();
        OrchestratorStatus { launching }
    }

    fn register(&self, workspace_id: &str) -> Result<(InFlightGuard, CancelSignal), OrchestratorError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if in_flight.contains_key(workspace_id) {
            warn!("Workspace {} is already launching", workspace_id);
            return Err(OrchestratorError::AlreadyLaunching(workspace_id.to_string()));
        }

        let (handle, signal) = cancellation();
        in_flight.insert(workspace_id.to_string(), handle);

        Ok((
            InFlightGuard {
                workspace_id: workspace_id.to_string(),
                in_flight: Arc::clone(&self.in_flight),
            },
            signal,
        ))
    }

    /// Wait before an item. Returns `false` if cancelled during the wait.
    async fn wait_before(&self, item: &WorkspaceItem, signal: &CancelSignal) -> bool {
        let Some(wait) = item.wait_duration() else {
            return true;
        };

        let ceiling = Duration::from_secs(self.config.max_wait_secs);
        if wait > ceiling {
            warn!(
                item = %item.name,
                "Clamping wait of {:.1}s to {}s",
                wait.as_secs_f64(),
                self.config.max_wait_secs
            );
        }
        let wait = wait.min(ceiling);
        if wait.is_zero() {
            return true;
        }

        debug!("Waiting {:.1}s before {}", wait.as_secs_f64(), item.name);
        tokio::select! {
            _ = tokio::time::sleep(wait) => true,
            _ = signal.cancelled() => false,
        }
    }

    /// Returns a failed outcome if the item's dependency is unsatisfied under
    /// the enforce policy.
    fn check_dependency(
        &self,
        item: &WorkspaceItem,
        attempted: &HashMap<&str, bool>,
    ) -> Option<LaunchOutcome> {
        if self.config.dependency_policy == DependencyPolicy::Advisory {
            return None;
        }

        let dependency = item.depends_on()?;
        let message = match attempted.get(dependency) {
            Some(true) => return None,
            Some(false) => format!("Dependency \"{}\" failed to launch", dependency),
            None => format!(
                "Dependency \"{}\" was not launched before this item",
                dependency
            ),
        };

        Some(LaunchOutcome::failure(item, FailureKind::Dependency, message, 0))
    }
}
