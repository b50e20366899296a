mod config;
mod errors;
mod frontend;
mod llm_client;
mod remix;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed PORT / LLM_TIMEOUT_SECS)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Remix API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.llm_timeout)?;
    info!(
        "LLM client initialized (default model: {}, timeout: {:?})",
        config.default_model, config.llm_timeout
    );
    if config.default_api_key.is_none() {
        info!("LLM_API_KEY not set; requests must supply their own key");
    }

    let state = AppState::new(config.clone(), llm);
    info!("Loaded {} platform guides", state.guides.all().len());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
