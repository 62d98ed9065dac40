//! Completion provider configuration.
//!
//! Provider credentials and tuning are resolved once at startup into an
//! explicit config struct and passed into the provider constructors - no
//! ambient environment lookups at request time.

use crate::providers::{AnthropicCompletionProvider, OpenAiCompletionProvider};
use crate::CompletionProvider;
use forge_core::{ConfigError, ForgeResult};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// PROVIDER KIND
// ============================================================================

/// Which completion provider backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// Parse from a configuration string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(ConfigError::ProviderNotSupported {
                provider: other.to_string(),
            }),
        }
    }

    /// Default model for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4.1",
            Self::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }
}

// ============================================================================
// LLM CONFIGURATION
// ============================================================================

/// Configuration for the completion provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider to use.
    pub provider: ProviderKind,
    /// API key for the selected provider. Required to build a provider.
    pub api_key: Option<String>,
    /// Model override; provider default when absent.
    pub model: Option<String>,
    /// Base URL override, e.g. for a proxy or compatible endpoint.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens in the completion.
    pub max_tokens: i32,
    /// Deadline for one provider request. A slow provider cannot hold
    /// resources past this.
    pub request_timeout: Duration,
    /// Maximum requests per minute to the provider.
    pub requests_per_minute: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            api_key: None,
            model: None,
            base_url: None,
            temperature: 0.2,
            max_tokens: 2000,
            request_timeout: Duration::from_secs(60),
            requests_per_minute: 60,
        }
    }
}

impl LlmConfig {
    /// Create LlmConfig from environment variables.
    ///
    /// Environment variables:
    /// - `FORGE_LLM_PROVIDER`: "openai" or "anthropic" (default: openai)
    /// - `FORGE_OPENAI_API_KEY` / `FORGE_ANTHROPIC_API_KEY`: provider credential
    /// - `FORGE_LLM_MODEL`: model override (default: provider-specific)
    /// - `FORGE_LLM_BASE_URL`: endpoint override
    /// - `FORGE_LLM_TEMPERATURE`: sampling temperature (default: 0.2)
    /// - `FORGE_LLM_MAX_TOKENS`: completion token cap (default: 2000)
    /// - `FORGE_LLM_TIMEOUT_SECS`: per-request deadline (default: 60)
    /// - `FORGE_LLM_RPM`: requests per minute (default: 60)
    pub fn from_env() -> ForgeResult<Self> {
        let provider = match std::env::var("FORGE_LLM_PROVIDER") {
            Ok(value) => ProviderKind::parse(&value)?,
            Err(_) => ProviderKind::OpenAi,
        };

        let api_key = match provider {
            ProviderKind::OpenAi => std::env::var("FORGE_OPENAI_API_KEY").ok(),
            ProviderKind::Anthropic => std::env::var("FORGE_ANTHROPIC_API_KEY").ok(),
        };

        let model = std::env::var("FORGE_LLM_MODEL").ok();
        let base_url = std::env::var("FORGE_LLM_BASE_URL").ok();

        let temperature = std::env::var("FORGE_LLM_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.2);

        let max_tokens = std::env::var("FORGE_LLM_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2000);

        let request_timeout = Duration::from_secs(
            std::env::var("FORGE_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        );

        let requests_per_minute = std::env::var("FORGE_LLM_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
            request_timeout,
            requests_per_minute,
        })
    }

    /// Model to use: the override if set, the provider default otherwise.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

/// Build the configured completion provider.
///
/// A missing API key is a startup error, not a per-request one: the
/// pipeline refuses to come up without its upstream credential.
pub fn build_provider(config: &LlmConfig) -> ForgeResult<Arc<dyn CompletionProvider>> {
    let (key_field, api_key) = match config.provider {
        ProviderKind::OpenAi => ("FORGE_OPENAI_API_KEY", config.api_key.as_deref()),
        ProviderKind::Anthropic => ("FORGE_ANTHROPIC_API_KEY", config.api_key.as_deref()),
    };

    let api_key = api_key.ok_or_else(|| ConfigError::MissingRequired {
        field: key_field.to_string(),
    })?;

    let provider: Arc<dyn CompletionProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiCompletionProvider::from_config(api_key, config)),
        ProviderKind::Anthropic => {
            Arc::new(AnthropicCompletionProvider::from_config(api_key, config))
        }
    };

    Ok(provider)
}
