//! Router tests for the JSON surface

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use payload_mcp_api::{build_router, AppState, ServerConfig};
use payload_mcp_generation::{ContextAwareGenerator, GenerationManager};

fn app() -> Router {
    let state = AppState::new(GenerationManager::new(ContextAwareGenerator::unavailable()));
    build_router(state, &ServerConfig::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(app(), Method::POST, uri, Some(body)).await
}

fn context() -> Value {
    json!({
        "projectStructure": {
            "collections": ["Posts"],
            "globals": ["Header"],
            "plugins": [],
            "hooks": []
        },
        "typeDefs": "",
        "relationships": [],
        "hookContext": null
    })
}

#[tokio::test]
async fn test_banner_and_health() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"MCP Server is running!");

    let (status, body) = send(app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_generate_field_keeps_key_order() {
    let (status, body) = post(
        "/api/mcp/generate/field",
        json!({"name": "title", "type": "text", "required": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "field");
    assert_eq!(body["success"], true);
    assert!(body.get("contextWarnings").is_none());

    let code = body["data"].as_str().unwrap();
    let name = code.find("\"name\": \"title\"").unwrap();
    let kind = code.find("\"type\": \"text\"").unwrap();
    let required = code.find("\"required\": true").unwrap();
    assert!(name < kind && kind < required);
}

#[tokio::test]
async fn test_generate_field_requires_name_and_type() {
    let (status, body) = post("/api/mcp/generate/field", json!({"name": "title"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "ValidationError");
    assert_eq!(body["error"]["message"], "Missing required parameters: name, type");
}

#[tokio::test]
async fn test_malformed_context_adds_warning() {
    let (status, body) = post(
        "/api/mcp/generate/field",
        json!({"name": "title", "type": "text", "context": {"projectStructure": []}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["contextWarnings"],
        json!(["Received context object does not match expected MCPContext structure."])
    );
}

#[tokio::test]
async fn test_context_without_hook_context_key_adds_warning() {
    let mut partial = context();
    partial.as_object_mut().unwrap().remove("hookContext");

    let (status, body) = post(
        "/api/mcp/validate/code",
        json!({"code": "const a = 1;", "fileType": "typescript", "context": partial}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["contextWarnings"],
        json!(["Received context object does not match expected MCPContext structure."])
    );
}

#[tokio::test]
async fn test_generate_template_unknown_kind_is_unprocessable() {
    let (status, body) = post(
        "/api/mcp/generate/template",
        json!({"type": "widget", "options": {}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "GenerationError");
    assert!(body["error"]["message"].as_str().unwrap().contains("widget"));
}

#[tokio::test]
async fn test_generate_template_collection() {
    let (status, body) = post(
        "/api/mcp/generate/template",
        json!({"type": "collection", "options": {"slug": "articles", "name": "Articles"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "template");
    assert!(body["data"].as_str().unwrap().contains("slug: 'articles'"));
}

#[tokio::test]
async fn test_generate_template_requires_type_and_options() {
    let (status, body) = post("/api/mcp/generate/template", json!({"type": "hook"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing required parameters: type, options");
}

#[tokio::test]
async fn test_generate_collection() {
    let (status, body) = post(
        "/api/mcp/generate/collection",
        json!({
            "slug": "posts",
            "singular": "Post",
            "plural": "Posts",
            "fields": [{"name": "title", "type": "text"}],
            "timestamps": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = body["data"].as_str().unwrap();
    assert!(code.contains("const Posts: CollectionConfig = {"));
    assert!(code.contains("timestamps: true,"));
}

#[tokio::test]
async fn test_generate_collection_rejects_empty_fields() {
    let (status, body) = post(
        "/api/mcp/generate/collection",
        json!({"slug": "posts", "fields": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "ValidationError");

    let (status, _) = post("/api/mcp/generate/collection", json!({"fields": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_code_without_model_is_unavailable() {
    let (status, body) = post(
        "/api/mcp/generate/code",
        json!({"prompt": "a hook", "context": context()}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["type"], "ModelUnavailable");
}

#[tokio::test]
async fn test_generate_code_requires_context() {
    let (status, body) = post("/api/mcp/generate/code", json!({"prompt": "a hook"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing required parameters: prompt, context");

    let (status, body) = post(
        "/api/mcp/generate/code",
        json!({"prompt": "a hook", "context": {"typeDefs": 3}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "ValidationError");

    let (status, _) = post(
        "/api/mcp/generate/code",
        json!({"prompt": 42, "context": context()}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_code() {
    let (status, body) = post(
        "/api/mcp/validate/code",
        json!({"code": "{\"a\": ", "fileType": "json"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "validate");
    assert_eq!(body["data"]["errors"][0]["ruleId"], "JSON001");
    assert_eq!(body["data"]["warnings"], json!([]));
}

#[tokio::test]
async fn test_validate_code_rejects_unknown_file_type() {
    let (status, body) = post(
        "/api/mcp/validate/code",
        json!({"code": "x", "fileType": "python"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("python"));

    let (status, _) = post("/api/mcp/validate/code", json!({"code": 1, "fileType": "json"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_rules_get_and_post() {
    let (status, body) = send(app(), Method::GET, "/api/mcp/query/rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "query");
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (_, body) = send(app(), Method::GET, "/api/mcp/query/rules?ruleQuery=json", None).await;
    assert_eq!(body["data"][0]["id"], "JSON001");

    let (status, body) = post("/api/mcp/query/rules", json!({"query": "TS001"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "rules");
    assert_eq!(body["data"][0]["id"], "TS001");

    let (status, body) = post("/api/mcp/query/rules", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing required parameter: query");
}

#[tokio::test]
async fn test_query_structure() {
    let (status, body) = post(
        "/api/mcp/query/structure",
        json!({"query": "find all collections", "context": context()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "structure");
    assert_eq!(
        body["data"],
        json!({"collections": ["Posts"], "globals": [], "plugins": [], "hooks": []})
    );

    let (status, _) = post("/api/mcp/query/structure", json!({"query": "globals"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scaffold_project() {
    let (status, body) = post(
        "/api/mcp/scaffold/project",
        json!({"projectName": "my-site", "dbAdapter": "mongoose", "framework": "express"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "scaffold");
    let files = body["data"].as_object().unwrap();
    assert!(files.contains_key("package.json"));
    assert!(files.contains_key("src/server.ts"));
    assert!(files[".env"].as_str().unwrap().contains("SERVER_URL="));
}

#[tokio::test]
async fn test_scaffold_project_reports_every_violation() {
    let (status, body) = post(
        "/api/mcp/scaffold/project",
        json!({"projectName": "My Site", "dbAdapter": "sqlite"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "ConfigurationError");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid scaffold options: "));

    let (status, body) = post("/api/mcp/scaffold/project", json!({"projectName": "site"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid parameters for scaffoldProject. Minimum required: projectName, dbAdapter."
    );
}

#[tokio::test]
async fn test_scaffold_validate() {
    let (status, body) = post(
        "/api/mcp/scaffold/validate",
        json!({"projectName": "Bad Name", "dbAdapter": "postgres"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isValid"], false);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 1);

    let (status, body) = post("/api/mcp/scaffold/validate", json!(["not", "an", "object"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid request body: Expected a configuration object."
    );
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mcp/generate/field")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["type"], "ValidationError");
}
