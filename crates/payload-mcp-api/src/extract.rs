//! Request body and context extraction

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use payload_mcp_generation::McpContext;

use crate::error::ApiError;

/// Warning attached when an optional context is malformed
pub const INVALID_CONTEXT_WARNING: &str =
    "Received context object does not match expected MCPContext structure.";

/// Error message when a required context is absent
pub const MISSING_CONTEXT_MESSAGE: &str =
    "MCPContext is required but was not provided in the request body.";

/// JSON body whose rejections render as `ValidationError`
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

impl JsonBody {
    /// The body as an object, or a validation error with `message`
    pub fn object(&self, message: &str) -> Result<&Map<String, Value>, ApiError> {
        self.0
            .as_object()
            .ok_or_else(|| ApiError::Validation(message.to_string()))
    }

    /// A member that is present and not null, empty string or `false`
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_truthy(value))
    }

    /// A non-empty string member
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Deserializes the body without its `context` member
    pub fn parse<T: DeserializeOwned>(&self, what: &str) -> Result<T, ApiError> {
        let mut value = self.0.clone();
        if let Some(map) = value.as_object_mut() {
            map.remove("context");
        }
        serde_json::from_value(value)
            .map_err(|e| ApiError::Validation(format!("Invalid {} parameters: {}", what, e)))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Context found in a request body
#[derive(Debug, Clone, Default)]
pub struct ExtractedContext {
    /// The context, when one was supplied and well-shaped
    pub context: Option<McpContext>,
    /// Warnings for the response envelope
    pub warnings: Vec<String>,
}

/// Context for routes that work without one
///
/// A malformed context is dropped with a warning rather than failing.
pub fn optional_context(body: &JsonBody) -> ExtractedContext {
    let Some(raw) = body.present("context") else {
        return ExtractedContext::default();
    };

    match McpContext::from_value(raw) {
        Ok(context) => ExtractedContext {
            context: Some(context),
            warnings: Vec::new(),
        },
        Err(e) => {
            warn!("Invalid context object received: {}", e);
            ExtractedContext {
                context: None,
                warnings: vec![INVALID_CONTEXT_WARNING.to_string()],
            }
        }
    }
}

/// Context for routes that cannot run without one
pub fn required_context(body: &JsonBody) -> Result<McpContext, ApiError> {
    let raw = body
        .present("context")
        .ok_or_else(|| ApiError::Validation(MISSING_CONTEXT_MESSAGE.to_string()))?;

    McpContext::from_value(raw).map_err(|e| {
        warn!("Invalid context object received: {}", e);
        ApiError::Validation(INVALID_CONTEXT_WARNING.to_string())
    })
}
