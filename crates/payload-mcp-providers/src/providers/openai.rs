//! OpenAI provider implementation
//!
//! Talks to the chat-completions endpoint of the OpenAI API (or any
//! API-compatible server reachable through a custom base URL).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ProviderError;
use crate::models::{ChatRequest, ChatResponse, FinishReason, ModelInfo, TokenUsage};
use crate::provider::Provider;

/// Default OpenAI API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider implementation
pub struct OpenAiProvider {
    api_key: String,
    client: Arc<Client>,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new OpenAI provider with a custom base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "OpenAI API key is required".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            client: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Convert OpenAI API response to our ChatResponse
    ///
    /// A choice without message content yields an empty completion rather
    /// than an error; callers decide what an empty completion means.
    fn convert_response(response: OpenAiChatResponse, model: String) -> ChatResponse {
        let first = response.choices.first();

        let content = first
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone())
            .unwrap_or_default();

        let finish_reason = match first.and_then(|c| c.finish_reason.as_deref()) {
            Some("length") => FinishReason::Length,
            Some("error") => FinishReason::Error,
            _ => FinishReason::Stop,
        };

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        ChatResponse {
            content,
            model,
            usage,
            finish_reason,
        }
    }

    /// Pull `error.message` out of an OpenAI error body, if it has one
    fn upstream_message(body: &str) -> Option<String> {
        serde_json::from_str::<OpenAiErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .filter(|m| !m.is_empty())
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn id(&self) -> &str {
        "openai"
    }

    fn name(&self) -> &str {
        "OpenAI"
    }

    fn models(&self) -> Vec<ModelInfo> {
        [
            ("gpt-4-turbo-preview", "GPT-4 Turbo Preview", 128_000),
            ("gpt-4-turbo", "GPT-4 Turbo", 128_000),
            ("gpt-4o", "GPT-4o", 128_000),
            ("gpt-4", "GPT-4", 8_192),
            ("gpt-3.5-turbo", "GPT-3.5 Turbo", 16_385),
        ]
        .into_iter()
        .map(|(id, name, context_window)| ModelInfo {
            id: id.to_string(),
            name: name.to_string(),
            provider: "openai".to_string(),
            context_window,
        })
        .collect()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        // `models()` is informational; OpenAI-compatible servers accept other ids
        let openai_request = OpenAiChatRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| OpenAiRequestMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!("Sending chat request to OpenAI for model: {}", request.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", self.get_auth_header())
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI API request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error ({}): {}", status, error_text);

            let message = Self::upstream_message(&error_text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let openai_response: OpenAiChatResponse = response.json().await?;
        Ok(Self::convert_response(openai_response, request.model))
    }
}

#[derive(Debug, Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiRequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OpenAiRequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAiProvider::new("sk-test".to_string());
        assert!(provider.is_ok());
        let provider = provider.unwrap();
        assert_eq!(provider.id(), "openai");
        assert_eq!(provider.name(), "OpenAI");
    }

    #[test]
    fn test_openai_provider_rejects_empty_key() {
        let result = OpenAiProvider::new(String::new());
        assert!(matches!(result, Err(ProviderError::ConfigError(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider =
            OpenAiProvider::with_base_url("sk-test".to_string(), "http://localhost/v1/".to_string())
                .unwrap();
        assert_eq!(provider.base_url, "http://localhost/v1");
    }

    #[test]
    fn test_models_include_default_generation_model() {
        let provider = OpenAiProvider::new("sk-test".to_string()).unwrap();
        assert!(provider
            .models()
            .iter()
            .any(|m| m.id == "gpt-4-turbo-preview"));
    }

    #[test]
    fn test_convert_response_without_content() {
        let response: OpenAiChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null},"finish_reason":"stop"}]}"#)
                .unwrap();
        let converted = OpenAiProvider::convert_response(response, "gpt-4".to_string());
        assert_eq!(converted.content, "");
        assert_eq!(converted.finish_reason, FinishReason::Stop);
        assert_eq!(converted.usage.total_tokens, 0);
    }

    #[test]
    fn test_upstream_message_extraction() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        assert_eq!(
            OpenAiProvider::upstream_message(body).as_deref(),
            Some("You exceeded your current quota")
        );
        assert_eq!(OpenAiProvider::upstream_message("not json"), None);
    }
}
