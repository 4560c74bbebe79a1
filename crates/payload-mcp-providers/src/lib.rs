//! Payload MCP model providers
//!
//! A small abstraction over external generative models. The generation
//! pipeline only depends on the [`Provider`] trait; [`OpenAiProvider`] is the
//! implementation wired in by the server.

pub mod error;
pub mod models;
pub mod provider;
pub mod providers;

pub use error::ProviderError;
pub use models::{ChatRequest, ChatResponse, FinishReason, Message, ModelInfo, TokenUsage};
pub use provider::Provider;
pub use providers::OpenAiProvider;
