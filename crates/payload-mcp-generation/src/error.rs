//! Error types for code generation

use thiserror::Error;

use payload_mcp_providers::ProviderError;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Requested template kind is not in the registry
    #[error("Invalid template type: {kind}. Valid types are: {valid}")]
    UnknownTemplateKind {
        /// The kind that was requested
        kind: String,
        /// Comma-separated list of registered kinds
        valid: String,
    },

    /// A value could not be rendered as source text
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Input is structurally unusable for the requested generation
    #[error("Invalid generation input: {0}")]
    InvalidInput(String),

    /// Project context failed the shape check
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    /// No generative model client was configured
    #[error("LLM client is not initialized. Check API key.")]
    ModelUnavailable,

    /// The generative model rejected the call or could not be reached
    #[error("LLM API request failed: {}", format_upstream(*status, message))]
    ModelRequestFailed {
        /// Upstream HTTP status, when one was received
        status: Option<u16>,
        /// Upstream error message
        message: String,
    },
}

fn format_upstream(status: Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{} {}", status, message),
        None => message.to_string(),
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Synthesis(err.to_string())
    }
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { status, message } => GenerationError::ModelRequestFailed {
                status: Some(status),
                message,
            },
            other => GenerationError::ModelRequestFailed {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

/// Result alias used throughout the generation crate
pub type Result<T> = std::result::Result<T, GenerationError>;
