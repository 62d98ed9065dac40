//! Generation Orchestrator
//!
//! Composes the completion provider, the artifact parser, and the project
//! store into one request/response operation. Each call runs the fixed
//! sequence Validating -> Completing -> Parsing -> Persisting -> Done;
//! no state is shared between calls and no retries happen here.

use forge_core::{Artifact, ForgeResult, NewProject, ProjectRecord, RecordId};
use forge_llm::{ensure_prompt, CompletionProvider};
use forge_storage::ProjectStore;
use std::sync::Arc;

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Outcome of one generation call.
///
/// Persistence is best-effort: when the store rejects the write, the
/// artifact and raw text are still returned, `record_id` is `None`, and
/// the failure is carried as a non-fatal warning for observability. The
/// HTTP layer does not expose the warning to callers; the generated files
/// matter more than the history entry.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Normalized file mapping, recomputed from the raw text. Never empty.
    pub artifact: Artifact,
    /// Verbatim provider output.
    pub llm_output: String,
    /// Id of the persisted record; None when persistence failed.
    pub record_id: Option<RecordId>,
    /// Non-fatal persistence failure, if any.
    pub persistence_warning: Option<String>,
}

// ============================================================================
// GENERATION SERVICE
// ============================================================================

/// Orchestrates prompt -> completion -> artifact -> record.
pub struct GenerationService {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn ProjectStore>,
}

impl GenerationService {
    /// Create a new generation service.
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<dyn ProjectStore>) -> Self {
        Self { provider, store }
    }

    /// Run one generation call.
    ///
    /// # Errors
    /// * `ForgeError::Validation` - empty prompt; nothing was attempted
    /// * `ForgeError::Llm` - provider failure; nothing was persisted
    ///
    /// A store failure is NOT an error here: the result is still returned,
    /// without a durable record (see `Generation::persistence_warning`).
    pub async fn generate(
        &self,
        user_id: Option<&str>,
        prompt: &str,
    ) -> ForgeResult<Generation> {
        // Validating: fail fast before any network or storage access.
        let prompt = ensure_prompt(prompt)?;

        // Completing: one upstream call, no retries. Failure aborts the
        // whole operation with nothing persisted.
        let completion = self.provider.complete(prompt).await?;
        tracing::debug!(
            model = %completion.model,
            latency_ms = completion.latency.as_millis() as u64,
            "Completion received"
        );

        // Parsing: total - malformed output becomes the fallback artifact.
        let artifact = Artifact::parse(&completion.text, prompt);

        // Persisting: best-effort. Losing the user's view of freshly
        // generated content is worse than losing a history entry.
        let new = NewProject::new(user_id, prompt, completion.text.clone());
        let (record_id, persistence_warning) = match self.store.project_insert(&new).await {
            Ok(id) => (Some(id), None),
            Err(e) => {
                tracing::warn!(error = %e, "Persistence failed; generation still returned");
                (None, Some(e.to_string()))
            }
        };

        Ok(Generation {
            artifact,
            llm_output: completion.text,
            record_id,
            persistence_warning,
        })
    }

    /// List a user's generation history, newest-first.
    pub async fn list_projects(&self, user_id: &str) -> ForgeResult<Vec<ProjectRecord>> {
        self.store.project_list_by_user(user_id).await
    }
}

impl std::fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService")
            .field("model", &self.provider.model_id())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
