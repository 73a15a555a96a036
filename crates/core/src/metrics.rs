//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Workspace launches (count, duration, outcome)
//! - Item launches by kind and result

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Orchestrator - Workspace Launch Metrics
// =============================================================================

/// Workspace launches total by result.
pub static WORKSPACE_LAUNCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "workdeck_workspace_launches_total",
            "Total workspace launches",
        ),
        &["result"], // "success", "partial", "cancelled"
    )
    .unwrap()
});

/// Workspace launch duration in seconds, waits included.
pub static WORKSPACE_LAUNCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "workdeck_workspace_launch_duration_seconds",
            "Duration of a workspace launch including configured waits",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Launcher - Item Metrics
// =============================================================================

/// Item launches total by kind and result.
pub static ITEM_LAUNCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("workdeck_item_launches_total", "Total item launches"),
        &["kind", "result"], // result: "success" or a failure kind
    )
    .unwrap()
});

/// Item dispatch duration in seconds.
pub static ITEM_LAUNCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "workdeck_item_launch_duration_seconds",
            "Duration of a single item dispatch",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["kind"],
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Workspace launches
        Box::new(WORKSPACE_LAUNCHES.clone()),
        Box::new(WORKSPACE_LAUNCH_DURATION.clone()),
        // Items
        Box::new(ITEM_LAUNCHES.clone()),
        Box::new(ITEM_LAUNCH_DURATION.clone()),
    ]
}
