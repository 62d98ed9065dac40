//! FORGE API - REST API Layer
//!
//! This crate exposes the generation pipeline over HTTP (Axum) and owns
//! the generation orchestrator plus the PostgreSQL-backed project store.
//! The UI layer is an external collaborator: it only needs the generate
//! and project-listing endpoints defined here.

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::{Generation, GenerationService};
pub use telemetry::{init_telemetry, TelemetryConfig};
pub use types::*;
