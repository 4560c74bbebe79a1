//! Error types for the providers module

use thiserror::Error;

/// Errors that can occur when interacting with providers
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// The upstream API rejected the request
    #[error("API request failed: {status} {message}")]
    Api {
        /// HTTP status returned by the upstream API
        status: u16,
        /// Upstream error message, or the status reason when none was sent
        message: String,
    },

    /// Network error occurred before a response was received
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic provider error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ProviderError {
    /// Upstream HTTP status, when the failure came from an HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::ProviderError("Request timeout".to_string())
        } else if err.is_connect() {
            ProviderError::NetworkError(err.to_string())
        } else if err.is_decode() {
            ProviderError::SerializationError(err.to_string())
        } else {
            ProviderError::ProviderError(err.to_string())
        }
    }
}
