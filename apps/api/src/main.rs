mod auth;
mod config;
mod documents;
mod errors;
mod generation;
mod language;
mod llm_client;
mod rate_limit;
mod routes;
mod similarity;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::DocumentRenderer;
use crate::llm_client::LlmClient;
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::similarity::{BundledStopwords, FastembedProvider, SimilarityScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Load the embedding model (downloads on first start)
    let model = config.embedding_model;
    let cache_dir = config.embedding_cache_dir.clone();
    let embedder = tokio::task::spawn_blocking(move || {
        FastembedProvider::try_new(model, cache_dir.as_deref())
    })
    .await??;
    info!("Embedding model loaded: {}", model.id());

    let stopwords = BundledStopwords::load();
    let scorer = SimilarityScorer::new(Arc::new(embedder), Arc::new(stopwords));

    let renderer = DocumentRenderer::from_paths(config.font_path.as_deref(), config.output_dir.clone())
        .context("FONT_PATH could not be read")?;
    if let Some(dir) = &config.output_dir {
        info!("Generated documents are archived in {}", dir.display());
    }

    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit));
    info!(
        "Rate limit: {} requests per {}s",
        config.rate_limit.max_requests,
        config.rate_limit.window.as_secs()
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        scorer,
        renderer,
        rate_limiter,
        api_key: Arc::from(config.api_key.as_str()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
