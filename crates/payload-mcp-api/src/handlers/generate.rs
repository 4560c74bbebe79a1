//! Generation endpoints

use axum::{extract::State, Json};
use serde_json::Value;

use payload_mcp_generation::{CollectionSpec, FieldSpec, TemplateKind};

use crate::{
    error::{ApiError, ApiResult},
    extract::{optional_context, required_context, JsonBody},
    models::McpResponse,
    state::AppState,
};

type CodeResponse = Json<McpResponse<String>>;

fn missing(params: &str) -> ApiError {
    ApiError::Validation(format!("Missing required parameters: {}", params))
}

/// `POST /mcp/generate/template`
pub async fn template(State(state): State<AppState>, body: JsonBody) -> ApiResult<CodeResponse> {
    let extracted = optional_context(&body);

    let (Some(kind), Some(options)) = (body.present("type"), body.present("options")) else {
        return Err(missing("type, options"));
    };
    let kind: TemplateKind = kind
        .as_str()
        .ok_or_else(|| ApiError::Validation("Parameter 'type' must be a string".to_string()))?
        .parse()?;
    let options = match options {
        Value::Object(map) => map,
        _ => {
            return Err(ApiError::Validation(
                "Parameter 'options' must be an object".to_string(),
            ))
        }
    };

    let code = state.generation.generate_template(kind, options)?;
    Ok(Json(McpResponse::new("template", code, extracted.warnings)))
}

/// `POST /mcp/generate/collection`
pub async fn collection(State(state): State<AppState>, body: JsonBody) -> ApiResult<CodeResponse> {
    let extracted = optional_context(&body);

    if body.present("slug").is_none() || body.present("fields").is_none() {
        return Err(missing("slug, fields"));
    }
    let spec: CollectionSpec = body.parse("collection")?;
    if spec.fields.is_empty() {
        return Err(ApiError::Validation(
            "Parameter 'fields' must contain at least one field".to_string(),
        ));
    }

    let code = state.generation.generate_collection(&spec)?;
    Ok(Json(McpResponse::new("collection", code, extracted.warnings)))
}

/// `POST /mcp/generate/field`
pub async fn field(State(state): State<AppState>, body: JsonBody) -> ApiResult<CodeResponse> {
    let extracted = optional_context(&body);

    if body.present("name").is_none() || body.present("type").is_none() {
        return Err(missing("name, type"));
    }
    let spec: FieldSpec = body.parse("field")?;

    let code = state.generation.generate_field(&spec)?;
    Ok(Json(McpResponse::new("field", code, extracted.warnings)))
}

/// `POST /mcp/generate/code`
pub async fn code(State(state): State<AppState>, body: JsonBody) -> ApiResult<CodeResponse> {
    let (Some(prompt), Some(_)) = (body.present("prompt"), body.present("context")) else {
        return Err(missing("prompt, context"));
    };
    let prompt = prompt
        .as_str()
        .ok_or_else(|| ApiError::Validation("Parameter 'prompt' must be a string".to_string()))?;
    let context = required_context(&body)?;

    let code = state.generation.generate_code(prompt, &context).await?;
    Ok(Json(McpResponse::new("code", code, Vec::new())))
}
