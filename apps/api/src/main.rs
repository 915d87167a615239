mod agent;
mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod search;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::search::{TavilyClient, WebSearch};
use crate::session::SessionStore;
use crate::state::AppState;

const SESSION_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Optimiser v{}", env!("CARGO_PKG_VERSION"));

    // Keyword pipeline: stop words and match mode fixed for the process lifetime
    let analyzer = Arc::new(Analyzer::new(config.match_mode));
    info!(
        "Keyword analyzer ready: {} stop words, match mode {:?}",
        analyzer.stop_words.len(),
        analyzer.match_mode
    );

    // Collaborators are optional: without keys the agent endpoints answer 503
    let llm: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; company research and rewriting are disabled");
            None
        }
    };

    let search: Option<Arc<dyn WebSearch>> = match &config.tavily_api_key {
        Some(key) => {
            info!("Web search client initialized");
            Some(Arc::new(TavilyClient::new(key.clone())?))
        }
        None => {
            warn!("TAVILY_API_KEY not set; company research and job search are disabled");
            None
        }
    };

    // Idle sessions are also dropped on access; the sweep bounds memory for abandoned ones
    let sessions = SessionStore::new(config.session_ttl);
    info!("Session TTL: {}s", config.session_ttl.num_seconds());
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_SECS));
        loop {
            interval.tick().await;
            sweeper.evict_expired().await;
        }
    });

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer,
        sessions,
        llm,
        search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the web frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
