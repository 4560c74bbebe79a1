//! API route definitions

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    config::ServerConfig,
    handlers::{generate, health, query, scaffold, validate},
    middleware::logging_middleware,
    state::AppState,
};

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Validation
        .route("/mcp/validate/code", post(validate::validate))
        // Queries
        .route(
            "/mcp/query/rules",
            get(query::list_rules).post(query::search_rules),
        )
        .route("/mcp/query/structure", post(query::query_structure))
        // Generation
        .route("/mcp/generate/template", post(generate::template))
        .route("/mcp/generate/collection", post(generate::collection))
        .route("/mcp/generate/field", post(generate::field))
        .route("/mcp/generate/code", post(generate::code))
        // Scaffolding
        .route("/mcp/scaffold/project", post(scaffold::project))
        .route("/mcp/scaffold/validate", post(scaffold::validate))
}

/// CORS policy for the configured origin list
///
/// `*` allows any origin; otherwise a comma-separated list of origins.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origin
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Full application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(health::banner))
        .nest("/api", api_routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors_layer(&config.cors_origin))
        .with_state(state)
}
