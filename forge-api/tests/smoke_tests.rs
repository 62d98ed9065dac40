//! End-to-end smoke tests for the FORGE API database store.
//!
//! These run against a real PostgreSQL instance (configure via FORGE_DB_*)
//! and are gated behind the `db-tests` feature.

#![cfg(feature = "db-tests")]

use forge_api::{ApiResult, DbClient, DbConfig};
use forge_core::NewProject;
use forge_storage::ProjectStore;

fn test_db() -> ApiResult<DbClient> {
    let config = DbConfig::from_env();
    DbClient::from_config(&config)
}

#[tokio::test]
async fn smoke_test_insert_and_list_chain() -> ApiResult<()> {
    let db = test_db()?;
    db.ensure_schema().await?;

    // Unique owner per run so reruns don't interfere
    let user_id = format!("smoke-{}", forge_core::new_record_id());

    let first = db
        .project_insert(&NewProject::new(
            Some(user_id.clone()),
            "smoke test project",
            "{\"a.txt\":\"hello\"}",
        ))
        .await
        .map_err(forge_api::ApiError::from)?;

    let second = db
        .project_insert(&NewProject::new(
            Some(user_id.clone()),
            "second smoke test project",
            "not json",
        ))
        .await
        .map_err(forge_api::ApiError::from)?;

    let records = db
        .project_list_by_user(&user_id)
        .await
        .map_err(forge_api::ApiError::from)?;

    assert_eq!(records.len(), 2);
    // Newest-first ordering
    assert_eq!(records[0].project_id, second);
    assert_eq!(records[1].project_id, first);
    assert_eq!(records[0].prompt, "second smoke test project");
    assert_eq!(records[0].llm_output, "not json");

    // Records are immutable and owner-scoped
    let other = db
        .project_list_by_user("smoke-nonexistent-user")
        .await
        .map_err(forge_api::ApiError::from)?;
    assert!(other.is_empty());

    Ok(())
}

#[tokio::test]
async fn smoke_test_anonymous_insert_is_unlisted() -> ApiResult<()> {
    let db = test_db()?;
    db.ensure_schema().await?;

    db.project_insert(&NewProject::new(
        None::<String>,
        "anonymous smoke project",
        "{}",
    ))
    .await
    .map_err(forge_api::ApiError::from)?;

    // Anonymous records have no owner and never appear in a user listing.
    let records = db
        .project_list_by_user("anonymous smoke project")
        .await
        .map_err(forge_api::ApiError::from)?;
    assert!(records.is_empty());

    Ok(())
}
