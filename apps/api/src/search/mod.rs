//! Web search — the single point of entry for outbound search queries.
//!
//! `TavilyClient` is the production `WebSearch`. Results are passed through
//! unvalidated; callers treat each snippet as a plain document.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Runs one query. Results come back in the engine's relevance order.
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .post(TAVILY_API_URL)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results,
                search_depth: "basic",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: TavilyResponse = response.json().await?;
        debug!("Search '{query}' returned {} results", body.results.len());
        Ok(body.results)
    }
}
