//! OpenAPI Specification for the FORGE API
//!
//! This module defines the OpenAPI document for the FORGE REST API.
//! It uses utoipa to generate the specification from Rust types and
//! route annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{generate, health, project};
use crate::types::{GenerateProjectRequest, GenerateProjectResponse, ListProjectsResponse};

use forge_core::{Artifact, ProjectRecord};

/// OpenAPI document for the FORGE API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FORGE API",
        version = "0.1.0",
        description = "Prompt-to-project generation service: submit a natural-language project description, receive a generated file set, persisted for later retrieval",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "http://localhost:8000", description = "Local Development")
    ),
    tags(
        (name = "Generation", description = "Prompt-to-project generation"),
        (name = "Projects", description = "Per-user generation history"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        generate::generate_project,
        project::list_projects,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        GenerateProjectRequest,
        GenerateProjectResponse,
        ListProjectsResponse,
        ProjectRecord,
        Artifact,
        ApiError,
        ErrorCode,
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/generate"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/projects/{user_id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/health/ready"));
    }
}
