use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workdeck_core::{
    load_config, load_default_config, validate_config, Config, HomePathResolver, ItemDispatcher,
    LaunchPrimitive, PathResolver, SystemLauncher, WorkspaceOrchestrator, WorkspaceStore,
    YamlWorkspaceStore,
};
use workdeck_server::api::create_router;
use workdeck_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the config file
const CONFIG_ENV: &str = "WORKDECK_CONFIG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("workdeck {}", VERSION);

    let config = load_configuration()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded successfully");

    // Create workspace store
    let resolver: Arc<dyn PathResolver> = Arc::new(HomePathResolver::new());
    let store_path = config.store.resolved_path(resolver.as_ref());
    info!("Workspace store: {:?}", store_path);
    let store: Arc<dyn WorkspaceStore> = Arc::new(YamlWorkspaceStore::new(store_path));

    // Surface an unreadable store at startup
    let workspaces = store
        .load_workspaces()
        .context("Failed to load workspaces")?;
    info!("Loaded {} workspaces", workspaces.len());

    // Create launcher and orchestrator
    let primitive: Arc<dyn LaunchPrimitive> = Arc::new(SystemLauncher::new(config.launcher.clone()));
    info!(
        "Using launch primitive: {} (allowed schemes: {:?})",
        primitive.name(),
        config.launcher.allowed_url_schemes
    );
    let dispatcher = ItemDispatcher::new(primitive, resolver);
    let orchestrator = WorkspaceOrchestrator::new(config.orchestrator.clone(), dispatcher);
    info!(
        "Orchestrator: dependency policy {:?}, max wait {}s",
        config.orchestrator.dependency_policy, config.orchestrator.max_wait_secs
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), store, orchestrator));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    Ok(())
}

/// Load the config file named by `WORKDECK_CONFIG`, or `config.toml`.
///
/// A missing default `config.toml` falls back to built-in defaults; a missing
/// file named explicitly is an error.
fn load_configuration() -> Result<Config> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let config_path = PathBuf::from(path);
            info!("Loading configuration from {:?}", config_path);
            load_config(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))
        }
        Err(_) => {
            let config_path = PathBuf::from("config.toml");
            if config_path.exists() {
                info!("Loading configuration from {:?}", config_path);
                load_config(&config_path)
                    .with_context(|| format!("Failed to load config from {:?}", config_path))
            } else {
                info!("No config.toml found, using defaults");
                load_default_config().context("Failed to load default config")
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
