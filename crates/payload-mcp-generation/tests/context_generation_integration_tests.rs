//! Integration tests for context-aware generation with a test-double provider

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use payload_mcp_generation::{
    ContextAwareGenerator, GenerationConfig, GenerationError, GenerationManager, McpContext,
    ModelClient,
};
use payload_mcp_providers::{
    ChatRequest, ChatResponse, FinishReason, ModelInfo, Provider, ProviderError, TokenUsage,
};
use serde_json::json;

/// Provider double that records every request
struct CountingProvider {
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
    reply: String,
    fail_with_status: Option<u16>,
}

impl CountingProvider {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            reply: reply.to_string(),
            fail_with_status: None,
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            reply: String::new(),
            fail_with_status: Some(status),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for CountingProvider {
    fn id(&self) -> &str {
        "counting"
    }

    fn name(&self) -> &str {
        "Counting"
    }

    fn models(&self) -> Vec<ModelInfo> {
        Vec::new()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone();
        *self.last_request.lock().unwrap() = Some(request);

        if let Some(status) = self.fail_with_status {
            return Err(ProviderError::Api {
                status,
                message: "Rate limit reached".to_string(),
            });
        }
        Ok(ChatResponse {
            content: self.reply.clone(),
            model,
            usage: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
        })
    }
}

fn context() -> McpContext {
    McpContext::from_value(&json!({
        "projectStructure": {
            "collections": ["Posts", "Users"],
            "globals": ["Header"],
            "plugins": [],
            "hooks": []
        },
        "typeDefs": "",
        "relationships": [],
        "hookContext": {"stage": "beforeChange", "operation": "create", "collectionSlug": "posts"}
    }))
    .unwrap()
}

fn manager(provider: Arc<CountingProvider>) -> GenerationManager {
    GenerationManager::new(ContextAwareGenerator::new(
        ModelClient::Available(provider),
        GenerationConfig::default(),
    ))
}

#[tokio::test]
async fn test_unavailable_model_makes_no_call() {
    let provider = CountingProvider::replying("unused");
    let manager = GenerationManager::new(ContextAwareGenerator::unavailable());

    let result = manager.generate_code("Add a slug field", &context()).await;

    assert!(matches!(result, Err(GenerationError::ModelUnavailable)));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_single_call_with_fixed_settings() {
    let provider = CountingProvider::replying(
        "Sure!\n```typescript\nexport const slug = { name: 'slug', type: 'text' };\n```",
    );
    let manager = manager(provider.clone());

    let code = manager.generate_code("Add a slug field", &context()).await.unwrap();

    assert_eq!(code, "export const slug = { name: 'slug', type: 'text' };\n");
    assert_eq!(provider.calls(), 1);

    let request = provider.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "gpt-4-turbo-preview");
    assert_eq!(request.temperature, Some(0.2));
    assert_eq!(request.max_tokens, Some(1000));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    let user = &request.messages[1].content;
    assert!(user.contains("// Collections: Posts, Users"));
    assert!(user.contains("// Stage: beforeChange"));
    assert!(user.contains("// Collection: posts"));
    assert!(user.contains("Add a slug field"));
}

#[tokio::test]
async fn test_placeholder_reply_becomes_diagnostic() {
    let provider = CountingProvider::replying("```typescript\n// Your code here...\n```");
    let code = manager(provider)
        .generate_code("Do the thing", &context())
        .await
        .unwrap();
    assert_eq!(
        code,
        "// LLM did not provide specific code for the prompt: \"Do the thing\"\n"
    );
}

#[tokio::test]
async fn test_upstream_failure_is_not_retried() {
    let provider = CountingProvider::failing(429);
    let result = manager(provider.clone())
        .generate_code("Add a slug field", &context())
        .await;

    match result {
        Err(GenerationError::ModelRequestFailed { status, message }) => {
            assert_eq!(status, Some(429));
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_identical_prompts_call_model_each_time() {
    let provider = CountingProvider::replying("const a = 1;");
    let manager = manager(provider.clone());
    for _ in 0..3 {
        manager.generate_code("same", &context()).await.unwrap();
    }
    assert_eq!(provider.calls(), 3);
}
