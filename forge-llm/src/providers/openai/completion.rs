//! OpenAI completion provider implementation

use super::client::OpenAiClient;
use super::types::{CompletionRequest, CompletionResponse, Message};
use crate::providers::invalid_response;
use crate::{ensure_prompt, Completion, CompletionProvider, LlmConfig, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use forge_core::ForgeResult;
use std::time::{Duration, Instant};

/// OpenAI completion provider using chat models.
pub struct OpenAiCompletionProvider {
    client: OpenAiClient,
    model: String,
    temperature: f32,
    max_tokens: i32,
}

impl OpenAiCompletionProvider {
    /// Create a new OpenAI completion provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-4.1", "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: OpenAiClient::new(api_key, 60, Duration::from_secs(60)),
            model: model.into(),
            temperature: 0.2,
            max_tokens: 2000,
        }
    }

    /// Create provider with the default gpt-4.1 model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "gpt-4.1")
    }

    /// Create a provider from configuration.
    pub fn from_config(api_key: &str, config: &LlmConfig) -> Self {
        let mut client = OpenAiClient::new(
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
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, prompt: &str) -> ForgeResult<Completion> {
        let prompt = ensure_prompt(prompt)?;

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        let started = Instant::now();
        let response: CompletionResponse = self.client.request("chat/completions", request).await?;
        let latency = started.elapsed();

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| invalid_response("openai", "Response contained no choices"))?;

        Ok(Completion {
            text,
            model: response.model,
            latency,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for OpenAiCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionProvider")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::ForgeError;

    #[tokio::test]
    async fn test_empty_prompt_rejected_before_network() {
        // The provider points at the real endpoint but the guard fires
        // before any request is built.
        let provider = OpenAiCompletionProvider::with_default_model("sk-test");
        let result = provider.complete("  ").await;
        assert!(matches!(result, Err(ForgeError::Validation(_))));
    }

    #[test]
    fn test_model_id_reports_configured_model() {
        let provider = OpenAiCompletionProvider::new("sk-test", "gpt-4o-mini");
        assert_eq!(provider.model_id(), "gpt-4o-mini");
    }
}
