//! Project History REST API Routes
//!
//! Read-only listing of a user's generation history. Records are immutable;
//! deletion, if ever offered, operates on the store directly and is not
//! part of this surface.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    services::GenerationService,
    types::ListProjectsResponse,
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for project routes.
#[derive(Clone)]
pub struct ProjectState {
    pub service: Arc<GenerationService>,
}

impl ProjectState {
    pub fn new(service: Arc<GenerationService>) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/projects/{user_id} - List a user's projects, newest-first
#[utoipa::path(
    get,
    path = "/api/v1/projects/{user_id}",
    tag = "Projects",
    params(
        ("user_id" = String, Path, description = "Opaque owning user id")
    ),
    responses(
        (status = 200, description = "Project history, newest-first", body = ListProjectsResponse),
        (status = 400, description = "Invalid user id", body = ApiError),
    ),
)]
pub async fn list_projects(
    State(state): State<Arc<ProjectState>>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if user_id.trim().is_empty() {
        return Err(ApiError::missing_field("user_id"));
    }

    let projects = state.service.list_projects(&user_id).await?;

    let response = ListProjectsResponse {
        total: projects.len() as i32,
        projects,
    };

    Ok(Json(response))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the project routes router.
pub fn create_router(service: Arc<GenerationService>) -> axum::Router {
    let state = Arc::new(ProjectState::new(service));

    axum::Router::new()
        .route("/:user_id", axum::routing::get(list_projects))
        .with_state(state)
}
