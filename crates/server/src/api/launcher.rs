//! Launch API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use workdeck_core::{LaunchOutcome, LaunchReport, OrchestratorError, WorkspaceItem};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Optional request body for launching a workspace
#[derive(Debug, Default, Deserialize)]
pub struct LaunchWorkspaceBody {
    /// Launch only the items of this preset
    pub preset: Option<String>,
}

/// Response for cancelling a launch
#[derive(Debug, Serialize)]
pub struct CancelLaunchResponse {
    pub cancelled: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct LaunchErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Launch a workspace (or one of its presets) and wait for the report.
///
/// The launch keeps running if the client goes away before the report.
pub async fn launch_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<LaunchWorkspaceBody>>,
) -> Result<Json<LaunchReport>, impl IntoResponse> {
    let preset = body.and_then(|Json(b)| b.preset);

    let workspace = match state.store().get_workspace(&id) {
        Ok(Some(workspace)) => workspace,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(LaunchErrorResponse {
                    error: format!("Workspace not found: {}", id),
                }),
            ));
        }
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LaunchErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
    };

    match state
        .orchestrator()
        .launch_workspace(&workspace, preset.as_deref())
        .await
    {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            let status = match e {
                OrchestratorError::AlreadyLaunching(_) => StatusCode::CONFLICT,
                OrchestratorError::PresetNotFound(_) => StatusCode::NOT_FOUND,
                OrchestratorError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(LaunchErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// Cancel the in-flight launch of a workspace
pub async fn cancel_launch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<CancelLaunchResponse> {
    Json(CancelLaunchResponse {
        cancelled: state.orchestrator().cancel(&id),
    })
}

/// Launch a single item immediately (no wait, no dependency check)
pub async fn launch_item(
    State(state): State<Arc<AppState>>,
    Json(item): Json<WorkspaceItem>,
) -> Json<LaunchOutcome> {
    Json(state.orchestrator().launch_item(&item).await)
}
