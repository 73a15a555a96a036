//! Mock launch primitive for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::launcher::{LaunchPrimitive, PrimitiveError};

/// A recorded primitive call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveCall {
    /// `open_external(url)`
    OpenExternal(String),
    /// `open_path(path)`
    OpenPath(String),
    /// `launch_app(executable, args)`
    LaunchApp(String, Vec<String>),
}

impl PrimitiveCall {
    /// The URL, path or executable the call targeted.
    pub fn target(&self) -> &str {
        match self {
            PrimitiveCall::OpenExternal(url) => url,
            PrimitiveCall::OpenPath(path) => path,
            PrimitiveCall::LaunchApp(executable, _) => executable,
        }
    }
}

/// Mock implementation of the LaunchPrimitive trait.
///
/// Records every call in order. Specific URLs, paths or executables can be
/// configured to fail, and each call can be given a simulated duration.
///
/// # Example
///
/// ```rust,ignore
/// use workdeck_core::testing::MockLaunchPrimitive;
///
/// let primitive = MockLaunchPrimitive::new();
/// primitive.fail_path("/home/ada/missing").await;
///
/// // Use in an ItemDispatcher...
///
/// let calls = primitive.calls().await;
/// assert_eq!(calls.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockLaunchPrimitive {
    calls: Arc<RwLock<Vec<PrimitiveCall>>>,
    failing_targets: Arc<RwLock<HashSet<String>>>,
    call_delay: Arc<RwLock<Option<Duration>>>,
}

impl MockLaunchPrimitive {
    /// Create a mock where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<PrimitiveCall> {
        self.calls.read().await.clone()
    }

    /// Targets of all calls made so far, in order.
    pub async fn targets(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .map(|c| c.target().to_string())
            .collect()
    }

    /// Make `open_external` fail for this URL.
    pub async fn fail_url(&self, url: impl Into<String>) {
        self.failing_targets.write().await.insert(url.into());
    }

    /// Make `open_path` or `launch_app` fail for this path or executable.
    pub async fn fail_path(&self, path: impl Into<String>) {
        self.failing_targets.write().await.insert(path.into());
    }

    /// Make every call take this long before returning.
    pub async fn set_call_delay(&self, delay: Duration) {
        *self.call_delay.write().await = Some(delay);
    }

    /// Forget recorded calls.
    pub async fn clear(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: PrimitiveCall) -> bool {
        let target = call.target().to_string();
        self.calls.write().await.push(call);

        let delay = *self.call_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.failing_targets.read().await.contains(&target)
    }
}

#[async_trait]
impl LaunchPrimitive for MockLaunchPrimitive {
    fn name(&self) -> &str {
        "mock"
    }

    async fn open_external(&self, url: &str) -> Result<(), PrimitiveError> {
        if self
            .record(PrimitiveCall::OpenExternal(url.to_string()))
            .await
        {
            return Err(PrimitiveError::OpenerFailed {
                program: "mock-opener".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("cannot open {}", url),
            });
        }
        Ok(())
    }

    async fn open_path(&self, path: &str) -> Result<(), PrimitiveError> {
        if self.record(PrimitiveCall::OpenPath(path.to_string())).await {
            return Err(PrimitiveError::NotFound { path: path.into() });
        }
        Ok(())
    }

    async fn launch_app(&self, executable: &str, args: &[String]) -> Result<(), PrimitiveError> {
        if self
            .record(PrimitiveCall::LaunchApp(
                executable.to_string(),
                args.to_vec(),
            ))
            .await
        {
            return Err(PrimitiveError::Spawn {
                program: executable.into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }
        Ok(())
    }
}
