//! HTTP API for Payload CMS code generation
//!
//! Exposes the generation crate over JSON routes under `/api`. Successful
//! responses use the [`models::McpResponse`] envelope; failures render through
//! [`error::ApiError`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
