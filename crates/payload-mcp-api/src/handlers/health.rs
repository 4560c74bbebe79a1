//! Health check endpoint

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{models::HealthResponse, state::AppState};

/// Banner served at `/`
pub const BANNER: &str = "MCP Server is running!";

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.uptime_seconds(),
    })
}

/// Plain text banner
pub async fn banner() -> &'static str {
    BANNER
}
