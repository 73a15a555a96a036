//! Types for the launcher module.

use serde::{Deserialize, Serialize};

use super::error::{FailureKind, LaunchError};
use crate::workspace::{ItemKind, WorkspaceItem};

/// Result of launching one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOutcome {
    /// Name of the item.
    pub item_name: String,
    /// Kind of the item.
    pub item_kind: ItemKind,
    /// Whether the item was started.
    pub succeeded: bool,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Failure category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    /// Time spent dispatching the item (excluding any wait before it).
    pub duration_ms: u64,
}

impl LaunchOutcome {
    /// A successful outcome.
    pub fn success(item: &WorkspaceItem, duration_ms: u64) -> Self {
        Self {
            item_name: item.name.clone(),
            item_kind: item.kind,
            succeeded: true,
            error_message: None,
            error_kind: None,
            duration_ms,
        }
    }

    /// A failed outcome.
    pub fn failure(
        item: &WorkspaceItem,
        kind: FailureKind,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            item_name: item.name.clone(),
            item_kind: item.kind,
            succeeded: false,
            error_message: Some(message.into()),
            error_kind: Some(kind),
            duration_ms,
        }
    }

    /// Outcome for an item that was never attempted because the launch was cancelled.
    pub fn cancelled(item: &WorkspaceItem) -> Self {
        Self::failure(
            item,
            FailureKind::Cancelled,
            "Launch cancelled before this item started",
            0,
        )
    }

    /// Normalize a dispatch result.
    pub fn from_result(
        item: &WorkspaceItem,
        result: Result<(), LaunchError>,
        duration_ms: u64,
    ) -> Self {
        match result {
            Ok(()) => Self::success(item, duration_ms),
            Err(e) => Self::failure(item, e.kind(), e.to_string(), duration_ms),
        }
    }
}

/// Aggregate result of launching a list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReport {
    /// Per-item outcomes in input order.
    pub outcomes: Vec<LaunchOutcome>,
    /// Number of items started.
    pub success_count: usize,
    /// Number of items that failed, were skipped or were cancelled.
    pub failure_count: usize,
    /// Whether the launch was cancelled before every item ran.
    pub cancelled: bool,
    /// Wall-clock time of the whole launch, waits included.
    pub duration_ms: u64,
}

impl LaunchReport {
    /// Report for an empty item list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a report and derive the counts.
    pub fn from_outcomes(outcomes: Vec<LaunchOutcome>, cancelled: bool, duration_ms: u64) -> Self {
        let success_count = outcomes.iter().filter(|o| o.succeeded).count();
        let failure_count = outcomes.len() - success_count;
        Self {
            outcomes,
            success_count,
            failure_count,
            cancelled,
            duration_ms,
        }
    }

    /// True when every item was started.
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0 && !self.cancelled
    }

    /// Outcomes that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &LaunchOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::ValidationError;

    #[test]
    fn test_empty_report() {
        let report = LaunchReport::empty();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 0);
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_report_counts() {
        let a = WorkspaceItem::app("A", "/a");
        let b = WorkspaceItem::folder("B", "/b");
        let c = WorkspaceItem::browser("C", ["https://example.com"]);

        let report = LaunchReport::from_outcomes(
            vec![
                LaunchOutcome::success(&a, 5),
                LaunchOutcome::failure(&b, FailureKind::LaunchPrimitive, "boom", 3),
                LaunchOutcome::cancelled(&c),
            ],
            true,
            42,
        );

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 2);
        assert!(!report.all_succeeded());
        let failed: Vec<&str> = report.failures().map(|o| o.item_name.as_str()).collect();
        assert_eq!(failed, vec!["B", "C"]);
    }

    #[test]
    fn test_from_result() {
        let item = WorkspaceItem::browser("Docs", Vec::<String>::new());
        let outcome = LaunchOutcome::from_result(
            &item,
            Err(ValidationError::MissingUrls {
                item: "Docs".to_string(),
            }
            .into()),
            0,
        );
        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(FailureKind::Validation));
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("Browser item \"Docs\" has no URLs")
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let item = WorkspaceItem::app("Editor", "/usr/bin/code");
        let json = serde_json::to_value(LaunchOutcome::success(&item, 7)).unwrap();
        assert_eq!(json["itemName"], "Editor");
        assert_eq!(json["itemKind"], "app");
        assert_eq!(json["succeeded"], true);
        assert!(json.get("errorMessage").is_none());
    }
}
