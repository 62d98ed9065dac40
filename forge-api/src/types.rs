//! API Request and Response Types
//!
//! This module defines all request and response types for the FORGE API.

use forge_core::ProjectRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// GENERATION TYPES
// ============================================================================

/// Request to generate a project from a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateProjectRequest {
    /// Natural-language project description. Required, must be non-empty.
    #[serde(default)]
    pub prompt: String,
    /// Opaque identifier of the owning user; omit for anonymous calls.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response from a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenerateProjectResponse {
    /// Generated files, keyed by path.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub files: BTreeMap<String, String>,
    /// Verbatim provider output, available for debugging or re-parsing.
    pub llm_output: String,
}

// ============================================================================
// PROJECT LISTING TYPES
// ============================================================================

/// Response containing a user's project history, newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListProjectsResponse {
    /// Project records, newest-first by creation time.
    pub projects: Vec<ProjectRecord>,
    /// Total count (no pagination is applied).
    pub total: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_missing_fields_default() -> Result<(), serde_json::Error> {
        // A body without prompt or user_id still deserializes; validation
        // happens in the handler so the caller gets a structured 400.
        let req: GenerateProjectRequest = serde_json::from_str("{}")?;
        assert!(req.prompt.is_empty());
        assert!(req.user_id.is_none());
        Ok(())
    }

    #[test]
    fn test_generate_request_full() -> Result<(), serde_json::Error> {
        let req: GenerateProjectRequest =
            serde_json::from_str(r#"{"prompt":"todo list app","user_id":"user-1"}"#)?;
        assert_eq!(req.prompt, "todo list app");
        assert_eq!(req.user_id.as_deref(), Some("user-1"));
        Ok(())
    }

    #[test]
    fn test_generate_response_serializes_files_as_object() -> Result<(), serde_json::Error> {
        let mut files = BTreeMap::new();
        files.insert("App.js".to_string(), "console.log('todo')".to_string());

        let response = GenerateProjectResponse {
            files,
            llm_output: "raw".to_string(),
        };

        let value = serde_json::to_value(&response)?;
        assert_eq!(value["files"]["App.js"], "console.log('todo')");
        assert_eq!(value["llm_output"], "raw");
        Ok(())
    }
}
