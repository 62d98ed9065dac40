//! Telemetry - Logging Infrastructure
//!
//! Sets up the tracing subscriber for structured logging. Output format
//! and filtering are controlled by environment variables so deployments
//! can switch to JSON logs without a rebuild.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name included in log output
    pub service_name: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: std::env::var("FORGE_SERVICE_NAME")
                .unwrap_or_else(|_| "forge-api".to_string()),
            environment: std::env::var("FORGE_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            json_logs: std::env::var("FORGE_JSON_LOGS")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }
}

/// Initialize the tracing subscriber.
///
/// This function should be called once at application startup before any
/// tracing occurs. The filter defaults to debug for the service and info
/// elsewhere, overridable via `RUST_LOG`.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("forge_api=debug,tower_http=debug,info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        "Telemetry initialized"
    );
}
