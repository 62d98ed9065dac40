//! Database Connection Pool Module
//!
//! This module provides PostgreSQL connection pooling using deadpool-postgres
//! and the `ProjectStore` implementation backed by the `projects` table.
//! Records are append-only; there is no update or delete path.

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use forge_core::{
    new_record_id, ForgeResult, NewProject, ProjectRecord, RecordId, StorageError,
};
use forge_storage::ProjectStore;
use std::time::Duration;
use tokio_postgres::NoTls;

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "forge".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("FORGE_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("FORGE_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("FORGE_DB_NAME").unwrap_or_else(|_| "forge".to_string()),
            user: std::env::var("FORGE_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("FORGE_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("FORGE_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("FORGE_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a connection pool and implements the
/// `ProjectStore` trait over the `projects` table.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        let status = self.pool.status();
        status.size
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> Result<deadpool_postgres::Object, StorageError> {
        self.pool.get().await.map_err(|e| {
            tracing::error!("Connection pool error: {:?}", e);
            StorageError::QueryFailed {
                reason: "failed to acquire database connection".to_string(),
            }
        })
    }

    /// Create the `projects` table and its listing index if absent.
    ///
    /// Called once at startup; the table holds the immutable record of
    /// every generation call.
    pub async fn ensure_schema(&self) -> ApiResult<()> {
        let conn = self
            .get_conn()
            .await
            .map_err(|e| ApiError::database_error(e.to_string()))?;

        conn.batch_execute(
            "CREATE TABLE IF NOT EXISTS projects (
                 project_id UUID PRIMARY KEY,
                 user_id    TEXT,
                 prompt     TEXT NOT NULL,
                 llm_output TEXT NOT NULL,
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now()
             );
             CREATE INDEX IF NOT EXISTS idx_projects_user_created
                 ON projects (user_id, created_at DESC);",
        )
        .await?;

        Ok(())
    }

    /// Cheap connectivity probe for the readiness endpoint.
    pub async fn ping(&self) -> ApiResult<()> {
        let conn = self
            .get_conn()
            .await
            .map_err(|e| ApiError::database_error(e.to_string()))?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}

// ============================================================================
// PROJECT STORE IMPLEMENTATION
// ============================================================================

#[async_trait]
impl ProjectStore for DbClient {
    async fn project_insert(&self, new: &NewProject) -> ForgeResult<RecordId> {
        let conn = self.get_conn().await?;

        let project_id = new_record_id();
        conn.execute(
            "INSERT INTO projects (project_id, user_id, prompt, llm_output)
             VALUES ($1, $2, $3, $4)",
            &[&project_id, &new.user_id, &new.prompt, &new.llm_output],
        )
        .await
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            StorageError::InsertFailed {
                reason: "database insert rejected".to_string(),
            }
        })?;

        Ok(project_id)
    }

    async fn project_list_by_user(&self, user_id: &str) -> ForgeResult<Vec<ProjectRecord>> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT project_id, user_id, prompt, llm_output, created_at
                 FROM projects
                 WHERE user_id = $1
                 ORDER BY created_at DESC, project_id DESC",
                &[&user_id],
            )
            .await
            .map_err(|e| {
                tracing::error!("Database error: {:?}", e);
                StorageError::QueryFailed {
                    reason: "database query failed".to_string(),
                }
            })?;

        let records = rows
            .into_iter()
            .map(|row| ProjectRecord {
                project_id: row.get(0),
                user_id: row.get(1),
                prompt: row.get(2),
                llm_output: row.get(3),
                created_at: row.get(4),
            })
            .collect();

        Ok(records)
    }
}
