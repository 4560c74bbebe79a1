//! Context-aware code generation
//!
//! Builds a prompt from the caller's project context, makes exactly one call
//! to the model and pulls the code block out of the reply. There are no
//! retries: upstream failures surface immediately.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info};

use payload_mcp_providers::{ChatRequest, Message, Provider};

use crate::context::McpContext;
use crate::error::{GenerationError, Result};
use crate::prompt_builder::{PromptBuilder, CODE_PLACEHOLDER};

/// Default model id
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

static TYPESCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```typescript\n([\s\S]*?)\n```").expect("code block pattern is valid")
});

/// Sampling settings for model calls
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Model id
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token limit
    pub max_tokens: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 1000,
        }
    }
}

/// Handle to the generative model, or the lack of one
#[derive(Clone)]
pub enum ModelClient {
    /// A configured provider
    Available(Arc<dyn Provider>),
    /// No credential was supplied at startup
    Unavailable,
}

impl ModelClient {
    /// True when a provider is configured
    pub fn is_available(&self) -> bool {
        matches!(self, ModelClient::Available(_))
    }
}

impl fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelClient::Available(provider) => {
                f.debug_tuple("Available").field(&provider.id()).finish()
            }
            ModelClient::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Generates code from a natural-language request and project context
#[derive(Debug, Clone)]
pub struct ContextAwareGenerator {
    client: ModelClient,
    config: GenerationConfig,
}

impl ContextAwareGenerator {
    /// Creates a generator over `client`
    pub fn new(client: ModelClient, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    /// Generator with no model; every call fails with `ModelUnavailable`
    pub fn unavailable() -> Self {
        Self::new(ModelClient::Unavailable, GenerationConfig::default())
    }

    /// The model client
    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    /// The sampling settings
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Returns unformatted code for `prompt`
    pub async fn generate(&self, prompt: &str, context: &McpContext) -> Result<String> {
        info!(prompt, "Generating context-aware code");

        let provider = match &self.client {
            ModelClient::Available(provider) => provider,
            ModelClient::Unavailable => return Err(GenerationError::ModelUnavailable),
        };

        let built = PromptBuilder::new(context).build(prompt);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(built.system_prompt),
                Message::user(built.user_prompt),
            ],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        debug!(provider = provider.id(), model = %self.config.model, "Sending prompt to model");
        let response = provider.chat(request).await.map_err(|e| {
            error!("Model request failed: {}", e);
            GenerationError::from(e)
        })?;
        debug!(
            tokens = response.usage.total_tokens,
            "Received model response"
        );

        Ok(extract_code(&response.content, prompt))
    }
}

/// Pulls the code out of a model reply
///
/// The interior of the first ```` ```typescript ```` block is used when
/// present, otherwise the whole reply. An empty result, or one that is just
/// the placeholder from the prompt, becomes a comment naming the prompt.
pub fn extract_code(response: &str, prompt: &str) -> String {
    let response = response.trim();
    let code = TYPESCRIPT_BLOCK
        .captures(response)
        .and_then(|captures| captures.get(1))
        .map(|block| block.as_str().trim())
        .unwrap_or(response);

    if code.is_empty() || code.starts_with(CODE_PLACEHOLDER) {
        format!("// LLM did not provide specific code for the prompt: \"{}\"", prompt)
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gpt-4-turbo-preview");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn test_extract_fenced_block() {
        let reply = "Here you go:\n```typescript\nexport const a = 1;\n```\nEnjoy.";
        assert_eq!(extract_code(reply, "p"), "export const a = 1;");
    }

    #[test]
    fn test_extract_falls_back_to_full_reply() {
        assert_eq!(extract_code("  const b = 2;  \n", "p"), "const b = 2;");
        assert_eq!(
            extract_code("```ts\nconst c = 3;\n```", "p"),
            "```ts\nconst c = 3;\n```"
        );
    }

    #[test]
    fn test_placeholder_and_empty_replies_become_diagnostics() {
        let expected = "// LLM did not provide specific code for the prompt: \"add hook\"";
        assert_eq!(extract_code("", "add hook"), expected);
        assert_eq!(
            extract_code("```typescript\n// Your code here...\n```", "add hook"),
            expected
        );
    }

    #[tokio::test]
    async fn test_unavailable_client_fails_fast() {
        let generator = ContextAwareGenerator::unavailable();
        assert!(!generator.client().is_available());
        let result = generator.generate("anything", &McpContext::default()).await;
        assert!(matches!(result, Err(GenerationError::ModelUnavailable)));
    }
}
