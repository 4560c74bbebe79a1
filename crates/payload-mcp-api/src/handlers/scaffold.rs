//! Project scaffolding endpoints

use axum::{extract::State, Json};
use tracing::warn;

use payload_mcp_generation::{
    validate_scaffold_options, FileSet, ScaffoldProjectConfig, ScaffoldValidation,
};

use crate::{
    error::{ApiError, ApiResult},
    extract::{optional_context, JsonBody},
    models::McpResponse,
    state::AppState,
};

/// `POST /mcp/scaffold/project`
pub async fn project(
    State(state): State<AppState>,
    body: JsonBody,
) -> ApiResult<Json<McpResponse<FileSet>>> {
    let extracted = optional_context(&body);

    if body.present("projectName").is_none() || body.present("dbAdapter").is_none() {
        return Err(ApiError::Validation(
            "Invalid parameters for scaffoldProject. Minimum required: projectName, dbAdapter."
                .to_string(),
        ));
    }
    let config: ScaffoldProjectConfig = body.parse("scaffold")?;

    let validation = validate_scaffold_options(&config);
    if !validation.is_valid {
        warn!(project = %config.project_name, errors = validation.errors.len(), "Rejected scaffold options");
        return Err(ApiError::Configuration {
            message: format!("Invalid scaffold options: {}", validation.errors.join(", ")),
            details: validation.errors,
        });
    }

    let files = state.generation.scaffold_project(&config)?;
    Ok(Json(McpResponse::new("scaffold", files, extracted.warnings)))
}

/// `POST /mcp/scaffold/validate`
pub async fn validate(body: JsonBody) -> ApiResult<Json<McpResponse<ScaffoldValidation>>> {
    let extracted = optional_context(&body);

    body.object("Invalid request body: Expected a configuration object.")?;
    let config: ScaffoldProjectConfig = body.parse("scaffold")?;

    Ok(Json(McpResponse::new(
        "scaffold",
        validate_scaffold_options(&config),
        extracted.warnings,
    )))
}
