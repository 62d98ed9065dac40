//! FORGE Storage - Project Store Abstraction
//!
//! Async trait for the durable project store plus an in-memory
//! implementation for tests and local development. The PostgreSQL-backed
//! implementation lives in the API crate next to its connection pool.

pub mod memory;

pub use memory::{FailingProjectStore, InMemoryProjectStore};

use async_trait::async_trait;
use forge_core::{ForgeResult, NewProject, ProjectRecord, RecordId};

/// Async trait for the durable project store.
///
/// Records are append-only and immutable: there is no update path, and
/// deletion is an external collaborator's concern operating directly on
/// the backing store. Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Append one immutable project record.
    ///
    /// The store assigns the record id and creation timestamp.
    ///
    /// # Returns
    /// * `Ok(RecordId)` - Id of the newly created record
    /// * `Err(ForgeError::Storage)` - If the write was rejected
    async fn project_insert(&self, new: &NewProject) -> ForgeResult<RecordId>;

    /// List a user's records, newest-first by creation timestamp.
    ///
    /// Re-reads current state on every call - no caching is implied.
    /// Unbounded; pagination is an external concern. Anonymous records
    /// (NULL owner) are never returned here.
    async fn project_list_by_user(&self, user_id: &str) -> ForgeResult<Vec<ProjectRecord>>;
}
