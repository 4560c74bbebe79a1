//! Code validation endpoint

use axum::Json;
use tracing::debug;

use payload_mcp_generation::{validate_code, ContentKind, ValidationReport};

use crate::{
    error::{ApiError, ApiResult},
    extract::{optional_context, JsonBody},
    models::McpResponse,
};

const MISSING_PARAMS: &str =
    "Missing or invalid parameters: \"code\" (string) and \"fileType\" (string) are required.";

/// Runs the rule engine over submitted code
pub async fn validate(body: JsonBody) -> ApiResult<Json<McpResponse<ValidationReport>>> {
    let extracted = optional_context(&body);

    let (Some(code), Some(file_type)) = (
        body.0.get("code").and_then(|v| v.as_str()),
        body.0.get("fileType").and_then(|v| v.as_str()),
    ) else {
        return Err(ApiError::Validation(MISSING_PARAMS.to_string()));
    };

    let kind: ContentKind = file_type.parse().map_err(ApiError::Validation)?;
    debug!(file_type = kind.as_str(), bytes = code.len(), "Validating code");

    let report = validate_code(code, kind);
    Ok(Json(McpResponse::new("validate", report, extracted.warnings)))
}
