//! In-memory project store for tests and local development.

use crate::ProjectStore;
use async_trait::async_trait;
use chrono::Utc;
use forge_core::{
    new_record_id, ForgeResult, NewProject, ProjectRecord, RecordId, StorageError,
};
use std::sync::RwLock;

/// In-memory, append-only project store.
/// Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    records: RwLock<Vec<ProjectRecord>>,
}

impl InMemoryProjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Total number of records across all users.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn project_insert(&self, new: &NewProject) -> ForgeResult<RecordId> {
        let record = ProjectRecord {
            project_id: new_record_id(),
            user_id: new.user_id.clone(),
            prompt: new.prompt.clone(),
            llm_output: new.llm_output.clone(),
            created_at: Utc::now(),
        };
        let id = record.project_id;

        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        records.push(record);

        Ok(id)
    }

    async fn project_list_by_user(&self, user_id: &str) -> ForgeResult<Vec<ProjectRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;

        let mut matching: Vec<ProjectRecord> = records
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();

        // Newest-first. Record ids are UUIDv7 and tie-break equal timestamps
        // in insertion order.
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.project_id.cmp(&a.project_id))
        });

        Ok(matching)
    }
}

/// Project store that rejects every operation.
///
/// Used to test the orchestrator's persistence-isolation policy: a store
/// failure must never turn a successful generation into an error.
#[derive(Debug, Default)]
pub struct FailingProjectStore;

impl FailingProjectStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProjectStore for FailingProjectStore {
    async fn project_insert(&self, _new: &NewProject) -> ForgeResult<RecordId> {
        Err(StorageError::InsertFailed {
            reason: "store configured to fail".to_string(),
        }
        .into())
    }

    async fn project_list_by_user(&self, _user_id: &str) -> ForgeResult<Vec<ProjectRecord>> {
        Err(StorageError::QueryFailed {
            reason: "store configured to fail".to_string(),
        }
        .into())
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
