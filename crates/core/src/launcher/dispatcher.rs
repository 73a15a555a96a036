//! Per-kind dispatch of a single workspace item.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::error::LaunchError;
use super::traits::LaunchPrimitive;
use super::types::LaunchOutcome;
use crate::metrics;
use crate::resolver::PathResolver;
use crate::workspace::{ItemKind, ValidationError, WorkspaceItem};

/// Starts items by kind using a launch primitive.
///
/// - `browser`: every URL is opened in order; the first failure aborts the item.
/// - `app`: with a companion folder the app is launched with that folder as
///   its argument, otherwise the app path is opened.
/// - `folder`: the folder is opened.
///
/// Paths are tilde-expanded before they reach the primitive.
#[derive(Clone)]
pub struct ItemDispatcher {
    primitive: Arc<dyn LaunchPrimitive>,
    resolver: Arc<dyn PathResolver>,
}

impl ItemDispatcher {
    pub fn new(primitive: Arc<dyn LaunchPrimitive>, resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            primitive,
            resolver,
        }
    }

    /// The underlying launch primitive.
    pub fn primitive(&self) -> &Arc<dyn LaunchPrimitive> {
        &self.primitive
    }

    /// Dispatch one item and return the raw result.
    pub async fn dispatch(&self, item: &WorkspaceItem) -> Result<(), LaunchError> {
        match item.kind {
            ItemKind::Browser => self.open_urls(item).await,
            ItemKind::App => self.launch_app(item).await,
            ItemKind::Folder => self.open_folder(item).await,
        }
    }

    /// Dispatch one item and normalize the result into an outcome.
    ///
    /// Never fails: errors are captured in the outcome.
    pub async fn launch(&self, item: &WorkspaceItem) -> LaunchOutcome {
        let started = Instant::now();
        let result = self.dispatch(item).await;
        let elapsed = started.elapsed();
        let duration_ms = elapsed.as_millis() as u64;

        let kind = item.kind.as_str();
        metrics::ITEM_LAUNCH_DURATION
            .with_label_values(&[kind])
            .observe(elapsed.as_secs_f64());

        let outcome = LaunchOutcome::from_result(item, result, duration_ms);
        match (&outcome.error_kind, &outcome.error_message) {
            (Some(failure), Some(message)) => {
                warn!(
                    item = %item.name,
                    kind = kind,
                    failure = failure.as_str(),
                    "Item launch failed: {}",
                    message
                );
                metrics::ITEM_LAUNCHES
                    .with_label_values(&[kind, failure.as_str()])
                    .inc();
            }
            _ => {
                info!(item = %item.name, kind = kind, duration_ms, "Item launched");
                metrics::ITEM_LAUNCHES
                    .with_label_values(&[kind, "success"])
                    .inc();
            }
        }

        outcome
    }

    async fn open_urls(&self, item: &WorkspaceItem) -> Result<(), LaunchError> {
        if item.urls.is_empty() {
            return Err(ValidationError::MissingUrls {
                item: item.name.clone(),
            }
            .into());
        }

        for url in &item.urls {
            debug!("Opening URL {} for {}", url, item.name);
            self.primitive
                .open_external(url)
                .await
                .map_err(|source| LaunchError::OpenUrl {
                    url: url.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    async fn launch_app(&self, item: &WorkspaceItem) -> Result<(), LaunchError> {
        let path = self.required_path(item)?;

        match item.companion_folder() {
            Some(folder) => {
                let folder = self.resolver.expand_tilde(folder);
                debug!("Launching {} with folder {}", path, folder);
                self.primitive
                    .launch_app(&path, &[folder])
                    .await
                    .map_err(|source| LaunchError::LaunchApp { source })
            }
            None => {
                debug!("Opening app {}", path);
                self.primitive
                    .open_path(&path)
                    .await
                    .map_err(|source| LaunchError::LaunchApp { source })
            }
        }
    }

    async fn open_folder(&self, item: &WorkspaceItem) -> Result<(), LaunchError> {
        let path = self.required_path(item)?;
        debug!("Opening folder {}", path);
        self.primitive
            .open_path(&path)
            .await
            .map_err(|source| LaunchError::OpenFolder { source })
    }

    fn required_path(&self, item: &WorkspaceItem) -> Result<String, LaunchError> {
        item.target_path()
            .map(|p| self.resolver.expand_tilde(p))
            .ok_or_else(|| {
                ValidationError::MissingPath {
                    kind: item.kind,
                    item: item.name.clone(),
                }
                .into()
            })
    }
}
