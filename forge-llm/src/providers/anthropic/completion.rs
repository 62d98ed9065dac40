//! Anthropic (Claude) completion provider implementation

use super::client::AnthropicClient;
use super::types::{ContentBlock, Message, MessageRequest, MessageResponse};
use crate::{ensure_prompt, Completion, CompletionProvider, LlmConfig, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use forge_core::ForgeResult;
use std::time::{Duration, Instant};

/// Anthropic completion provider using Claude models.
pub struct AnthropicCompletionProvider {
    client: AnthropicClient,
    model: String,
    temperature: f32,
    max_tokens: i32,
}

impl AnthropicCompletionProvider {
    /// Create a new Anthropic completion provider.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `model` - Model name (e.g., "claude-3-5-sonnet-20241022")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key, 50, Duration::from_secs(60)),
            model: model.into(),
            temperature: 0.2,
            max_tokens: 2000,
        }
    }

    /// Create provider with the default Claude 3.5 Sonnet model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "claude-3-5-sonnet-20241022")
    }

    /// Create a provider from configuration.
    pub fn from_config(api_key: &str, config: &LlmConfig) -> Self {
        let mut client = AnthropicClient::new(
            api_key,
            config.requests_per_minute,
            config.request_timeout,
        );
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.clone());
        }

        Self {
            client,
            model: config.model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Extract text from content blocks.
    fn extract_text(content: Vec<ContentBlock>) -> String {
        content
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl CompletionProvider for AnthropicCompletionProvider {
    async fn complete(&self, prompt: &str) -> ForgeResult<Completion> {
        let prompt = ensure_prompt(prompt)?;

        let request = MessageRequest {
            model: self.model.clone(),
            system: Some(SYSTEM_INSTRUCTION.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        };

        let started = Instant::now();
        let response: MessageResponse = self.client.request("messages", request).await?;
        let latency = started.elapsed();

        Ok(Completion {
            text: Self::extract_text(response.content),
            model: response.model,
            latency,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for AnthropicCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicCompletionProvider")
            .field("model", &self.model)
            .finish()
    }
}
