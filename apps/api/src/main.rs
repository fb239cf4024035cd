mod config;
mod documents;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::scorer::GeminiScorer;
use crate::routes::build_router;
use crate::state::AppState;

const BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,tower_http=info",
                env!("CARGO_CRATE_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fails startup when GOOGLE_API_KEY is missing
    let config = Config::from_env()?;

    info!("Starting Resume Matcher API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.google_api_key);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        scorer: Arc::new(GeminiScorer(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = BIND_ADDR.parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
