//! Payload MCP API server binary

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use payload_mcp_api::{build_router, AppState, ServerConfig};
use payload_mcp_generation::{
    ContextAwareGenerator, GenerationConfig, GenerationManager, ModelClient,
};
use payload_mcp_providers::providers::OpenAiProvider;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("MCP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("MCP server shut down");
    Ok(())
}

/// Wires the OpenAI provider into the generation stack
fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    // Context-aware generation is exposed, so a credential is mandatory
    let api_key = config.require_api_key()?.to_string();
    info!(model = %config.model, base_url = %config.openai_base_url, "OpenAI client configured");

    let provider = OpenAiProvider::with_base_url(api_key, config.openai_base_url.clone())
        .context("Failed to initialize OpenAI client")?;
    let generator = ContextAwareGenerator::new(
        ModelClient::Available(Arc::new(provider)),
        GenerationConfig {
            model: config.model.clone(),
            ..GenerationConfig::default()
        },
    );
    Ok(AppState::new(GenerationManager::new(generator)))
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
