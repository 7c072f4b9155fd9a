mod analysis;
mod config;
mod errors;
mod generation;
mod llm_client;
mod matching;
mod preprocessing;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::{Advisor, LlmAdvisor, TemplateAdvisor};
use crate::llm_client::LlmClient;
use crate::matching::{Embedder, HttpEmbedder, LexicalEmbedder};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerVantage v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(&config)?;
    info!("Embedding backend: {}", embedder.backend());

    let advisor = build_advisor(&config)?;
    info!("Recommendation backend: {}", advisor.backend());

    let state = AppState {
        config: config.clone(),
        embedder,
        advisor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Remote embeddings when EMBEDDING_API_URL is set, otherwise the offline lexical model.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match &config.embedding_api_url {
        Some(url) => {
            let embedder = HttpEmbedder::new(
                url,
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
            )?;
            info!("Using embedding server at {url} (model: {})", config.embedding_model);
            Ok(Arc::new(embedder))
        }
        None => Ok(Arc::new(LexicalEmbedder)),
    }
}

/// LLM-written advice when ANTHROPIC_API_KEY is set, otherwise curated templates.
fn build_advisor(config: &Config) -> Result<Arc<dyn Advisor>> {
    match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.anthropic_model.clone())?;
            info!("LLM client initialized (model: {})", client.model());
            Ok(Arc::new(LlmAdvisor(client)))
        }
        None => Ok(Arc::new(TemplateAdvisor)),
    }
}
