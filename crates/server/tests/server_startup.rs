use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config with the store inside `store_dir`
fn minimal_config(port: u16, store_dir: &Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[store]
path = "{}"
"#,
        port,
        store_dir.join("workspaces.yaml").display()
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_workdeck"))
        .env("WORKDECK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Run the server to completion and return its exit status
async fn run_to_exit(config_path: &Path) -> std::process::Output {
    timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_workdeck"))
            .env("WORKDECK_CONFIG", config_path)
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let store_dir = TempDir::new().unwrap();
    let config = write_config(&minimal_config(port, store_dir.path()));

    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_endpoint_reflects_file() {
    let port = get_available_port();
    let store_dir = TempDir::new().unwrap();
    let content = format!(
        "{}\n[orchestrator]\ndependency_policy = \"enforce\"\nmax_wait_secs = 10\n",
        minimal_config(port, store_dir.path())
    );
    let config = write_config(&content);

    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/config", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["server"]["port"], port);
    assert_eq!(json["orchestrator"]["dependency_policy"], "enforce");
    assert_eq!(json["orchestrator"]["max_wait_secs"], 10);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_workspace_survives_restart() {
    let port = get_available_port();
    let store_dir = TempDir::new().unwrap();
    let config = write_config(&minimal_config(port, store_dir.path()));
    let client = Client::new();

    let mut server = spawn_server(config.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let created: serde_json::Value = client
        .post(format!("http://127.0.0.1:{}/api/v1/workspaces", port))
        .json(&serde_json::json!({
            "name": "Morning",
            "items": [{ "type": "browser", "name": "Mail", "urls": ["https://mail.example.com"] }]
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let id = created["id"].as_str().unwrap().to_string();

    server.kill().await.ok();
    server.wait().await.ok();

    let mut server = spawn_server(config.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not restart in time"
    );

    let fetched = client
        .get(format!("http://127.0.0.1:{}/api/v1/workspaces/{}", port, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(fetched.status().is_success());

    let json: serde_json::Value = fetched.json().await.expect("Failed to parse JSON");
    assert_eq!(json["name"], "Morning");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = run_to_exit(Path::new("/nonexistent/config.toml")).await;

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_invalid_port_exits_with_error() {
    let store_dir = TempDir::new().unwrap();
    let config = write_config(&minimal_config(0, store_dir.path()));

    let result = run_to_exit(config.path()).await;

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_unknown_dependency_policy_exits_with_error() {
    let store_dir = TempDir::new().unwrap();
    let content = format!(
        "{}\n[orchestrator]\ndependency_policy = \"strict\"\n",
        minimal_config(get_available_port(), store_dir.path())
    );
    let config = write_config(&content);

    let result = run_to_exit(config.path()).await;

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_corrupt_store_exits_with_error() {
    let store_dir = TempDir::new().unwrap();
    std::fs::write(
        store_dir.path().join("workspaces.yaml"),
        "workspaces: [this is: not: valid",
    )
    .unwrap();
    let config = write_config(&minimal_config(get_available_port(), store_dir.path()));

    let result = run_to_exit(config.path()).await;

    assert!(!result.status.success());
}
