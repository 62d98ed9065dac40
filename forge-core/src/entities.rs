//! Persistent and per-call entity types for the generation pipeline.

use crate::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// PROJECT RECORD
// ============================================================================

/// Durable, immutable record of one generation call.
///
/// Created exactly once per successful completion call, whether or not the
/// raw output parses into a file mapping. The store exclusively owns the
/// durable representation; no update or partial-write path exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectRecord {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub project_id: RecordId,
    /// Opaque identifier of the owning user; NULL for anonymous generations.
    pub user_id: Option<String>,
    /// The prompt that produced this record.
    pub prompt: String,
    /// Verbatim provider output. The Artifact is recomputed from this on
    /// demand and is never stored as structured data.
    pub llm_output: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// Insert payload for a new project record.
///
/// The store assigns `project_id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub user_id: Option<String>,
    pub prompt: String,
    pub llm_output: String,
}

impl NewProject {
    pub fn new(
        user_id: Option<impl Into<String>>,
        prompt: impl Into<String>,
        llm_output: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.map(Into::into),
            prompt: prompt.into(),
            llm_output: llm_output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_record_id;
    use chrono::Utc;

    #[test]
    fn test_new_project_builder() {
        let new = NewProject::new(Some("user-1"), "todo list app", "{}");
        assert_eq!(new.user_id.as_deref(), Some("user-1"));
        assert_eq!(new.prompt, "todo list app");
        assert_eq!(new.llm_output, "{}");

        let anonymous = NewProject::new(None::<String>, "todo list app", "{}");
        assert!(anonymous.user_id.is_none());
    }

    #[test]
    fn test_project_record_serde_roundtrip() -> Result<(), serde_json::Error> {
        let record = ProjectRecord {
            project_id: new_record_id(),
            user_id: Some("user-1".to_string()),
            prompt: "todo list app".to_string(),
            llm_output: "{\"App.js\":\"console.log('todo')\"}".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&record)?;
        let decoded: ProjectRecord = serde_json::from_str(&json)?;
        assert_eq!(decoded, record);
        Ok(())
    }

    #[test]
    fn test_anonymous_user_serializes_as_null() -> Result<(), serde_json::Error> {
        let record = ProjectRecord {
            project_id: new_record_id(),
            user_id: None,
            prompt: "p".to_string(),
            llm_output: "o".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&record)?;
        assert!(value["user_id"].is_null());
        Ok(())
    }
}
