//! Workspace API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use workdeck_core::{StoreError, Workspace, WorkspaceItem, WorkspacePreset};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or replacing a workspace
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceBody {
    /// Explicit id for create; generated when absent. Ignored on update.
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<WorkspaceItem>,
    #[serde(default)]
    pub presets: Vec<WorkspacePreset>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WorkspaceBody {
    fn into_workspace(self, id: String) -> Workspace {
        let now = Utc::now();
        Workspace {
            id,
            name: self.name,
            description: self.description,
            items: self.items,
            presets: self.presets,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Response for listing workspaces
#[derive(Debug, Serialize)]
pub struct ListWorkspacesResponse {
    pub workspaces: Vec<Workspace>,
    pub total: usize,
}

/// Response for deleting a workspace
#[derive(Debug, Serialize)]
pub struct DeleteWorkspaceResponse {
    pub deleted: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct WorkspaceErrorResponse {
    pub error: String,
}

type ErrorReply = (StatusCode, Json<WorkspaceErrorResponse>);

fn store_error(e: StoreError) -> ErrorReply {
    let status = match e {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(WorkspaceErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn not_found(id: &str) -> ErrorReply {
    (
        StatusCode::NOT_FOUND,
        Json(WorkspaceErrorResponse {
            error: format!("Workspace not found: {}", id),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// List all workspaces
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListWorkspacesResponse>, impl IntoResponse> {
    match state.store().load_workspaces() {
        Ok(workspaces) => Ok(Json(ListWorkspacesResponse {
            total: workspaces.len(),
            workspaces,
        })),
        Err(e) => Err(store_error(e)),
    }
}

/// Create a workspace
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WorkspaceBody>,
) -> Result<(StatusCode, Json<Workspace>), impl IntoResponse> {
    let id = body
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match state.store().get_workspace(&id) {
        Ok(Some(_)) => {
            return Err((
                StatusCode::CONFLICT,
                Json(WorkspaceErrorResponse {
                    error: format!("Workspace already exists: {}", id),
                }),
            ))
        }
        Ok(None) => {}
        Err(e) => return Err(store_error(e)),
    }

    match state.store().save_workspace(body.into_workspace(id)) {
        Ok(workspace) => {
            info!("Workspace created via API: {}", workspace.id);
            Ok((StatusCode::CREATED, Json(workspace)))
        }
        Err(e) => Err(store_error(e)),
    }
}

/// Get a workspace by ID
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workspace>, impl IntoResponse> {
    match state.store().get_workspace(&id) {
        Ok(Some(workspace)) => Ok(Json(workspace)),
        Ok(None) => Err(not_found(&id)),
        Err(e) => Err(store_error(e)),
    }
}

/// Replace an existing workspace
pub async fn update_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<WorkspaceBody>,
) -> Result<Json<Workspace>, impl IntoResponse> {
    match state.store().get_workspace(&id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(&id)),
        Err(e) => return Err(store_error(e)),
    }

    match state.store().save_workspace(body.into_workspace(id)) {
        Ok(workspace) => Ok(Json(workspace)),
        Err(e) => Err(store_error(e)),
    }
}

/// Delete a workspace
pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteWorkspaceResponse>, impl IntoResponse> {
    match state.store().delete_workspace(&id) {
        Ok(true) => Ok(Json(DeleteWorkspaceResponse { deleted: true })),
        Ok(false) => Err(not_found(&id)),
        Err(e) => Err(store_error(e)),
    }
}
