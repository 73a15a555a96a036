//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock launch primitive and a temporary YAML store, so launches can
//! be exercised without opening anything on the host.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use workdeck_core::{
    testing::{MockLaunchPrimitive, MockWorkspaceStore},
    Config, HomePathResolver, ItemDispatcher, OrchestratorConfig, StoreConfig,
    WorkspaceOrchestrator, WorkspaceStore, YamlWorkspaceStore,
};
use workdeck_server::state::AppState;

/// Re-export fixtures for test convenience
pub use workdeck_core::testing::fixtures;

/// Home directory the fixture's path resolver expands `~/` to.
pub const TEST_HOME: &str = "/home/ada";

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_workspace_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/workspaces", json!({
///         "name": "Dev",
///         "items": []
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock launch primitive - inspect calls, configure failures
    pub primitive: Arc<MockLaunchPrimitive>,
    /// Shared application state
    pub state: Arc<AppState>,
    /// Temporary directory holding the workspace file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default orchestrator settings.
    pub fn new() -> Self {
        Self::with_orchestrator_config(OrchestratorConfig::default())
    }

    /// Create a test fixture with custom orchestrator settings.
    pub fn with_orchestrator_config(orchestrator_config: OrchestratorConfig) -> Self {
        Self::build(orchestrator_config, None)
    }

    /// Create a test fixture backed by an in-memory store.
    pub fn with_mock_store(store: Arc<MockWorkspaceStore>) -> Self {
        let store: Arc<dyn WorkspaceStore> = store;
        Self::build(OrchestratorConfig::default(), Some(store))
    }

    fn build(
        orchestrator_config: OrchestratorConfig,
        store: Option<Arc<dyn WorkspaceStore>>,
    ) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store_path = temp_dir.path().join("workspaces.yaml");

        let config = Config {
            store: StoreConfig {
                path: store_path.clone(),
            },
            orchestrator: orchestrator_config.clone(),
            ..Config::default()
        };

        let primitive = Arc::new(MockLaunchPrimitive::new());
        let dispatcher = ItemDispatcher::new(
            primitive.clone(),
            Arc::new(HomePathResolver::with_home(TEST_HOME)),
        );
        let orchestrator = WorkspaceOrchestrator::new(orchestrator_config, dispatcher);
        let store: Arc<dyn WorkspaceStore> = match store {
            Some(store) => store,
            None => Arc::new(YamlWorkspaceStore::new(store_path)),
        };

        let state = Arc::new(AppState::new(config, store, orchestrator));
        let router = workdeck_server::api::create_router(state.clone());

        Self {
            router,
            primitive,
            state,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Create a workspace through the API and return its id.
    pub async fn create_workspace(&self, body: Value) -> String {
        let response = self.post("/api/v1/workspaces", body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"]
            .as_str()
            .expect("workspace id")
            .to_string()
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
