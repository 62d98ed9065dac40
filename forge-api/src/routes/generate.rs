//! Generation REST API Route
//!
//! This module implements the Axum route handler for the generation
//! endpoint. Validation failures surface as structured 400s; upstream
//! failures as 502/504. A persistence failure is deliberately invisible
//! here - the generated files are still returned.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    services::GenerationService,
    types::{GenerateProjectRequest, GenerateProjectResponse},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for the generation route.
#[derive(Clone)]
pub struct GenerateState {
    pub service: Arc<GenerationService>,
}

impl GenerateState {
    pub fn new(service: Arc<GenerationService>) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/generate - Generate a project from a prompt
#[utoipa::path(
    post,
    path = "/api/v1/generate",
    tag = "Generation",
    request_body = GenerateProjectRequest,
    responses(
        (status = 200, description = "Project generated successfully", body = GenerateProjectResponse),
        (status = 400, description = "Missing or empty prompt", body = ApiError),
        (status = 502, description = "Completion provider failed", body = ApiError),
        (status = 504, description = "Completion provider timed out", body = ApiError),
    ),
)]
pub async fn generate_project(
    State(state): State<Arc<GenerateState>>,
    Json(req): Json<GenerateProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    // Validate required fields
    if req.prompt.trim().is_empty() {
        return Err(ApiError::missing_field("prompt"));
    }

    let generation = state
        .service
        .generate(req.user_id.as_deref(), &req.prompt)
        .await?;

    Ok(Json(GenerateProjectResponse {
        files: generation.artifact.into_files(),
        llm_output: generation.llm_output,
    }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the generation route router.
pub fn create_router(service: Arc<GenerationService>) -> axum::Router {
    let state = Arc::new(GenerateState::new(service));

    axum::Router::new()
        .route("/", axum::routing::post(generate_project))
        .with_state(state)
}
