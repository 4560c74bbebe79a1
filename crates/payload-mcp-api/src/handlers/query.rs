//! Rule and project structure queries

use axum::{extract::Query, Json};

use payload_mcp_generation::{
    query_project_structure, query_rules, StructureQueryResult, ValidationRule,
};

use crate::{
    error::{ApiError, ApiResult},
    extract::{optional_context, required_context, JsonBody},
    models::{McpResponse, RuleQueryParams},
};

/// `GET /mcp/query/rules?ruleQuery=`
pub async fn list_rules(
    Query(params): Query<RuleQueryParams>,
) -> Json<McpResponse<Vec<&'static ValidationRule>>> {
    let rules = query_rules(params.rule_query.as_deref().unwrap_or_default());
    Json(McpResponse::new("query", rules, Vec::new()))
}

/// `POST /mcp/query/rules`
pub async fn search_rules(body: JsonBody) -> ApiResult<Json<McpResponse<Vec<&'static ValidationRule>>>> {
    let extracted = optional_context(&body);

    let query = body
        .non_empty_str("query")
        .ok_or_else(|| ApiError::Validation("Missing required parameter: query".to_string()))?;

    Ok(Json(McpResponse::new("rules", query_rules(query), extracted.warnings)))
}

/// `POST /mcp/query/structure`
pub async fn query_structure(body: JsonBody) -> ApiResult<Json<McpResponse<StructureQueryResult>>> {
    let (Some(query), Some(_)) = (body.non_empty_str("query"), body.present("context")) else {
        return Err(ApiError::Validation(
            "Missing required parameters: query, context".to_string(),
        ));
    };

    let context = required_context(&body)?;
    let result = query_project_structure(query, &context);
    Ok(Json(McpResponse::new("structure", result, Vec::new())))
}
