//! REST API Routes Module
//!
//! This module contains all REST API route handlers:
//! - Generation endpoint (prompt -> files)
//! - Project history listing
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for browser-based clients

pub mod generate;
pub mod health;
pub mod project;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::services::GenerationService;

// Re-export route creation functions for convenience
pub use generate::create_router as generate_router;
pub use health::create_router as health_router;
pub use project::create_router as project_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// CORS
// ============================================================================

/// Build the CORS layer from configuration.
///
/// Empty origin list means allow-all (dev mode, matching the original
/// service); a configured list locks the API down to those origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

/// Build the complete API router.
///
/// # Layers (outer to inner)
/// 1. CORS (outermost) - handles preflight requests
/// 2. Trace - request/response logging
pub fn create_api_router(
    service: Arc<GenerationService>,
    db: DbClient,
    config: &ApiConfig,
) -> Router {
    let api_routes = Router::new()
        .nest("/generate", generate::create_router(service.clone()))
        .nest("/projects", project::create_router(service));

    let router = Router::new()
        .nest("/api/v1", api_routes)
        // Health checks (no auth required)
        .nest("/health", health::create_router(db));

    // OpenAPI spec
    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}
