//! FORGE API Server Entry Point
//!
//! Bootstraps configuration, builds the completion provider and the
//! database-backed project store, and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use forge_api::{
    create_api_router, init_telemetry, ApiConfig, ApiError, ApiResult, DbClient, DbConfig,
    GenerationService, TelemetryConfig,
};
use forge_llm::{build_provider, LlmConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_telemetry(&telemetry_config);

    let llm_config = LlmConfig::from_env().map_err(ApiError::from)?;
    let provider = build_provider(&llm_config).map_err(ApiError::from)?;
    tracing::info!(model = provider.model_id(), "Completion provider ready");

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;
    db.ensure_schema().await?;

    let api_config = ApiConfig::from_env();

    let service = Arc::new(GenerationService::new(provider, Arc::new(db.clone())));
    let app: Router = create_api_router(service, db, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting FORGE API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("FORGE_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("FORGE_API_PORT").ok())
        .unwrap_or_else(|| "8000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
