//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `payload-mcp.toml`, `PAYLOAD_MCP_*` environment variables, then the
//! conventional `OPENAI_API_KEY`, `PORT` and `CORS_ORIGIN` variables.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use payload_mcp_generation::code_generator::DEFAULT_MODEL;
use payload_mcp_providers::providers::openai::DEFAULT_BASE_URL;

/// Default configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "payload-mcp.toml";

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "PAYLOAD_MCP";

/// Default request body limit (5 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// No OpenAI credential was supplied
    #[error("OPENAI_API_KEY is required but not found in environment variables")]
    MissingApiKey,
}

/// HTTP server settings
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allowed CORS origin(s), comma-separated, or `*`
    pub cors_origin: String,
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible API base URL
    pub openai_base_url: String,
    /// Model used for context-aware generation
    pub model: String,
    /// Maximum accepted request body size in bytes
    pub body_limit_bytes: usize,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "*".to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Loads `.env`, then the config file and process environment
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        dotenv::dotenv().ok();
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(Path::new(CONFIG_FILE), env)
    }

    /// Loads from an explicit file path and environment map
    pub fn load_from(file: &Path, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let conventional = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        let config = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("cors_origin", defaults.cors_origin)?
            .set_default("openai_base_url", defaults.openai_base_url)?
            .set_default("model", defaults.model)?
            .set_default("body_limit_bytes", defaults.body_limit_bytes as u64)?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(env.clone())))
            .set_override_option("openai_api_key", conventional("OPENAI_API_KEY"))?
            .set_override_option("port", conventional("PORT"))?
            .set_override_option("cors_origin", conventional("CORS_ORIGIN"))?
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("port must be greater than 0".to_string()));
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::Validation(
                "body_limit_bytes must be greater than 0".to_string(),
            ));
        }
        if self.cors_origin.trim().is_empty() {
            return Err(ConfigError::Validation("cors_origin must not be empty".to_string()));
        }
        Ok(())
    }

    /// The API key, or an error when none was configured
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
