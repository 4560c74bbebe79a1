//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use payload_mcp_generation::GenerationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request fields
    #[error("{0}")]
    Validation(String),

    /// Scaffold options failed validation
    #[error("{message}")]
    Configuration {
        /// Summary message
        message: String,
        /// Individual violations
        details: Vec<String>,
    },

    /// Unknown template kind or synthesis failure
    #[error("{0}")]
    Generation(String),

    /// No model client configured
    #[error("{0}")]
    ModelUnavailable(String),

    /// The model call failed upstream
    #[error("{0}")]
    ModelRequestFailed(String),

    /// Anything else
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code and taxonomy name
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "ValidationError"),
            ApiError::Configuration { .. } => (StatusCode::BAD_REQUEST, "ConfigurationError"),
            ApiError::Generation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "GenerationError"),
            ApiError::ModelUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ModelUnavailable")
            }
            ApiError::ModelRequestFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ModelRequestFailed")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let message = err.to_string();
        match err {
            GenerationError::UnknownTemplateKind { .. }
            | GenerationError::Synthesis(_)
            | GenerationError::InvalidInput(_) => ApiError::Generation(message),
            GenerationError::InvalidContext(_) => ApiError::Validation(message),
            GenerationError::ModelUnavailable => ApiError::ModelUnavailable(message),
            GenerationError::ModelRequestFailed { .. } => ApiError::ModelRequestFailed(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.classify();
        if status.is_server_error() {
            error!(error_type, "Request failed: {}", self);
        }

        let mut body = json!({
            "message": self.to_string(),
            "type": error_type,
        });
        if let ApiError::Configuration { details, .. } = &self {
            body["details"] = Value::from(details.clone());
        }

        (status, Json(json!({ "error": body }))).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_errors_map_to_taxonomy() {
        let unknown: ApiError = GenerationError::UnknownTemplateKind {
            kind: "widget".into(),
            valid: "collection".into(),
        }
        .into();
        assert_eq!(unknown.classify(), (StatusCode::UNPROCESSABLE_ENTITY, "GenerationError"));

        let unavailable: ApiError = GenerationError::ModelUnavailable.into();
        assert_eq!(
            unavailable.classify(),
            (StatusCode::INTERNAL_SERVER_ERROR, "ModelUnavailable")
        );

        let failed: ApiError = GenerationError::ModelRequestFailed {
            status: Some(429),
            message: "slow down".into(),
        }
        .into();
        assert_eq!(failed.to_string(), "LLM API request failed: 429 slow down");

        let context: ApiError = GenerationError::InvalidContext("bad".into()).into();
        assert_eq!(context.classify().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_configuration_error_status() {
        let err = ApiError::Configuration {
            message: "Invalid scaffold options".into(),
            details: vec!["a".into()],
        };
        assert_eq!(err.classify(), (StatusCode::BAD_REQUEST, "ConfigurationError"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
