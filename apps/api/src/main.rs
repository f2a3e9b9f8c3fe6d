mod catalog;
mod config;
mod db;
mod duration;
mod errors;
mod fetch;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::llm_client::GeminiClient;
use crate::recommend::Recommender;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting assessment recommendation API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Provider is optional: without a key the LLM and embedding scorers
    // report unavailable and the keyword heuristic serves every request.
    let llm = config.gemini_api_key.clone().map(GeminiClient::new);
    match &llm {
        Some(_) => info!("Gemini provider configured"),
        None => info!("No Gemini API key set — keyword scorer only"),
    }

    // Build the scorer chain
    let recommender = Arc::new(Recommender::new(llm)?);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        recommender,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
