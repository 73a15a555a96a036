use std::sync::Arc;
use workdeck_core::{Config, WorkspaceOrchestrator, WorkspaceStore};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn WorkspaceStore>,
    orchestrator: WorkspaceOrchestrator,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn WorkspaceStore>,
        orchestrator: WorkspaceOrchestrator,
    ) -> Self {
        Self {
            config,
            store,
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn WorkspaceStore {
        self.store.as_ref()
    }

    pub fn orchestrator(&self) -> &WorkspaceOrchestrator {
        &self.orchestrator
    }
}
