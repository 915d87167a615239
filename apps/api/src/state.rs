use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::search::WebSearch;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Keyword pipeline configuration — stop words and match mode. Read-only.
    pub analyzer: Arc<Analyzer>,
    pub sessions: SessionStore,
    /// None when ANTHROPIC_API_KEY is not set; agent endpoints then answer 503.
    pub llm: Option<Arc<dyn TextGenerator>>,
    /// None when TAVILY_API_KEY is not set.
    pub search: Option<Arc<dyn WebSearch>>,
}

impl AppState {
    pub fn llm(&self) -> Result<&dyn TextGenerator, AppError> {
        self.llm
            .as_deref()
            .ok_or(AppError::AgentUnavailable("LLM provider (ANTHROPIC_API_KEY)"))
    }

    pub fn search(&self) -> Result<&dyn WebSearch, AppError> {
        self.search
            .as_deref()
            .ok_or(AppError::AgentUnavailable("Web search (TAVILY_API_KEY)"))
    }
}
