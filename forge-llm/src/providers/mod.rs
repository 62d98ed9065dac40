//! Completion provider implementations
//!
//! This module contains concrete implementations of the CompletionProvider
//! trait for the supported LLM services.

pub mod anthropic;
pub mod openai;

pub use anthropic::{AnthropicClient, AnthropicCompletionProvider};
pub use openai::{OpenAiClient, OpenAiCompletionProvider};

use forge_core::{ForgeError, LlmError};

/// Build a RequestFailed error for the given provider.
pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> ForgeError {
    ForgeError::Llm(LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    })
}

/// Build an InvalidResponse error for the given provider.
pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> ForgeError {
    ForgeError::Llm(LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}

/// Build a RateLimited error for the given provider.
pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> ForgeError {
    ForgeError::Llm(LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    })
}

/// Build a Timeout error for the given provider.
pub(crate) fn timed_out(provider: &str, elapsed_ms: u64) -> ForgeError {
    ForgeError::Llm(LlmError::Timeout {
        provider: provider.to_string(),
        elapsed_ms,
    })
}
