pub mod config;
pub mod launcher;
pub mod metrics;
pub mod orchestrator;
pub mod resolver;
pub mod testing;
pub mod workspace;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    StoreConfig,
};
pub use launcher::{
    FailureKind, ItemDispatcher, LaunchError, LaunchOutcome, LaunchPrimitive, LaunchReport,
    LauncherConfig, PrimitiveError, SystemLauncher,
};
pub use orchestrator::{
    cancellation, CancelHandle, CancelSignal, DependencyPolicy, OrchestratorConfig,
    OrchestratorError, OrchestratorStatus, WorkspaceOrchestrator,
};
pub use resolver::{HomePathResolver, PathGuard, PathResolver, PathSecurityError};
pub use workspace::{
    ItemKind, StoreError, ValidationError, Workspace, WorkspaceItem, WorkspacePreset,
    WorkspaceStore, YamlWorkspaceStore,
};
