//! FORGE LLM - Completion Provider Abstraction
//!
//! Provider-agnostic trait for text completion. The generation pipeline
//! talks to a `CompletionProvider`; concrete implementations for OpenAI
//! and Anthropic live under `providers`.

pub mod config;
pub mod providers;

pub use config::{build_provider, LlmConfig, ProviderKind};

use async_trait::async_trait;
use forge_core::{ForgeResult, LlmError, ValidationError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// SYSTEM INSTRUCTION
// ============================================================================

/// Fixed system instruction prepended to every completion call.
///
/// Never user-overridable. Instructs the provider to emit a JSON object
/// whose keys are file paths and whose values are file contents, with a
/// README explaining the project.
pub const SYSTEM_INSTRUCTION: &str = "You are a reliable code generator. \
    Respond with a single JSON object whose keys are file paths and whose \
    values are the complete contents of those files. Include a README.md \
    entry explaining the project. Do not wrap the object in markdown \
    fences or add any text outside the JSON object.";

// ============================================================================
// COMPLETION TYPES
// ============================================================================

/// Result of one completion call. Ephemeral - held only for the duration
/// of one orchestration call and never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Verbatim text returned by the provider.
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    /// Wall-clock latency of the provider call, for diagnostics.
    pub latency: Duration,
}

// ============================================================================
// COMPLETION PROVIDER TRAIT
// ============================================================================

/// Trait for completion providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// One call to `complete` makes at most one outbound request; providers do
/// not retry. Upstream failures (timeout, non-2xx, malformed envelope) are
/// surfaced immediately as `LlmError` with the provider's message attached.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the given prompt.
    ///
    /// The fixed system instruction is prepended by the implementation;
    /// callers supply only the user prompt. An empty prompt (after
    /// trimming) is rejected before any network call.
    async fn complete(&self, prompt: &str) -> ForgeResult<Completion>;

    /// Get the model identifier this provider calls.
    fn model_id(&self) -> &str;
}

/// Reject an empty-after-trim prompt before any network access.
pub fn ensure_prompt(prompt: &str) -> ForgeResult<&str> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "prompt".to_string(),
        }
        .into());
    }
    Ok(prompt)
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// Scripted behavior for the mock provider.
#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(String),
    Fail(LlmError),
}

/// Mock completion provider for testing.
///
/// Returns a canned response or a scripted failure, and counts calls so
/// tests can assert that no provider call happened (e.g. on invalid input).
#[derive(Debug)]
pub struct MockCompletionProvider {
    model_id: String,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockCompletionProvider {
    /// Create a mock that always returns the given text.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            behavior: MockBehavior::Respond(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always fails with the given error.
    pub fn failing(error: LlmError) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            behavior: MockBehavior::Fail(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, prompt: &str) -> ForgeResult<Completion> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        ensure_prompt(prompt)?;

        match &self.behavior {
            MockBehavior::Respond(text) => Ok(Completion {
                text: text.clone(),
                model: self.model_id.clone(),
                latency: Duration::ZERO,
            }),
            MockBehavior::Fail(error) => Err(error.clone().into()),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Whitespace-only prompts are always rejected before any call.
        #[test]
        fn prop_whitespace_prompt_rejected(ws in "[ \\t\\n\\r]{0,20}") {
            prop_assert!(ensure_prompt(&ws).is_err());
        }

        /// Any prompt with a non-whitespace character passes the guard
        /// unchanged - no trimming or normalization is applied.
        #[test]
        fn prop_non_blank_prompt_accepted(
            prefix in "[ \\t]{0,5}",
            body in "[a-zA-Z0-9]{1,30}",
        ) {
            let prompt = format!("{}{}", prefix, body);
            prop_assert_eq!(ensure_prompt(&prompt).unwrap(), prompt.as_str());
        }
    }
}
