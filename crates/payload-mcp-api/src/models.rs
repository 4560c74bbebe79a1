//! API request and response models

use serde::{Deserialize, Serialize};

/// Uniform success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResponse<T> {
    /// Tool that handled the request
    pub tool: String,
    /// Always true; failures use the error envelope
    pub success: bool,
    /// Tool output
    pub data: T,
    /// Problems with the supplied context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_warnings: Option<Vec<String>>,
}

impl<T> McpResponse<T> {
    /// Wraps tool output; an empty warning list is omitted
    pub fn new(tool: impl Into<String>, data: T, context_warnings: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            success: true,
            data,
            context_warnings: if context_warnings.is_empty() {
                None
            } else {
                Some(context_warnings)
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: u64,
}

/// Query string of `GET /api/mcp/query/rules`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleQueryParams {
    /// Substring to filter rules by
    #[serde(default)]
    pub rule_query: Option<String>,
}
