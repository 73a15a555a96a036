//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the workdeck server:
//! - HTTP request metrics (latency, counts)
//! - Stored workspaces and in-flight launches (collected dynamically)
//! - Core launch metrics, registered from `workdeck_core::metrics`

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "workdeck_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 60.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("workdeck_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "workdeck_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Workspace Metrics (collected dynamically)
// =============================================================================

/// Workspaces in the store.
pub static WORKSPACES_STORED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("workdeck_workspaces_stored", "Number of stored workspaces").unwrap()
});

/// Workspace launches currently in progress.
pub static LAUNCHES_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "workdeck_launches_in_flight",
        "Number of workspace launches currently in progress",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Workspaces
    registry
        .register(Box::new(WORKSPACES_STORED.clone()))
        .unwrap();
    registry
        .register(Box::new(LAUNCHES_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (workspace and item launches)
    for metric in workdeck_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so gauges reflect the store and orchestrator.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    if let Ok(workspaces) = state.store().load_workspaces() {
        WORKSPACES_STORED.set(workspaces.len() as i64);
    }

    let status = state.orchestrator().status();
    LAUNCHES_IN_FLIGHT.set(status.launching.len() as i64);
}

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    static UUID_REGEX: Lazy<regex_lite::Regex> = Lazy::new(|| {
        regex_lite::Regex::new(
            r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        )
        .unwrap()
    });
    static NUMERIC_REGEX: Lazy<regex_lite::Regex> =
        Lazy::new(|| regex_lite::Regex::new(r"/\d+(/|$)").unwrap());

    let result = UUID_REGEX.replace_all(path, "{id}");
    let result = NUMERIC_REGEX.replace_all(&result, "/{id}$1");
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_uuid() {
        let path = "/api/v1/workspaces/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(normalize_path(path), "/api/v1/workspaces/{id}");
    }

    #[test]
    fn test_normalize_path_uuid_middle() {
        let path = "/api/v1/workspaces/550e8400-e29b-41d4-a716-446655440000/launch";
        assert_eq!(normalize_path(path), "/api/v1/workspaces/{id}/launch");
    }

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/v1/workspaces/12345";
        assert_eq!(normalize_path(path), "/api/v1/workspaces/{id}");
    }

    #[test]
    fn test_normalize_path_no_ids() {
        let path = "/api/v1/health";
        assert_eq!(normalize_path(path), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("workdeck_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs labelled metrics that have been touched
        workdeck_core::metrics::WORKSPACE_LAUNCHES
            .with_label_values(&["success"])
            .inc();
        workdeck_core::metrics::ITEM_LAUNCHES
            .with_label_values(&["folder", "success"])
            .inc();
        WORKSPACES_STORED.set(0);
        LAUNCHES_IN_FLIGHT.set(0);

        let output = encode_metrics();
        assert!(output.contains("workdeck_workspace_launches_total"));
        assert!(output.contains("workdeck_item_launches_total"));
        assert!(output.contains("workdeck_workspaces_stored"));
        assert!(output.contains("workdeck_launches_in_flight"));
    }
}
