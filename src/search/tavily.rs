//! Tavily Client
//!
//! Thin client over `POST /search` of the Tavily API. Results are returned
//! as title/url/snippet triples and rendered as JSON for the model.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SearchConfig;

pub const TAVILY_API_BASE: &str = "https://api.tavily.com";

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Tavily API key not configured")]
    NoApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// A single web search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub url: String,
    /// Extracted page content relevant to the query
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
    include_answer: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// Tavily search client
#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    api_base: String,
    max_results: usize,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: TAVILY_API_BASE.to_string(),
            max_results: 3,
        }
    }

    /// Configure client from config; `None` when no key is set
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        let api_key = config.tavily_api_key.clone()?;

        let mut client = Self::new(api_key).with_max_results(config.max_results);
        if let Some(base) = &config.api_base {
            client = client.with_api_base(base);
        }
        Some(client)
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max.max(1);
        self
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run a web search
    pub async fn search(&self, query: &str) -> Result<Vec<WebResult>, SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::NoApiKey);
        }

        info!(query = %query, max_results = self.max_results, "Searching the web via Tavily");

        let body = SearchRequest {
            query,
            max_results: self.max_results,
            search_depth: "basic",
            include_answer: false,
        };

        let response = self
            .client
            .post(format!("{}/search", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!(raw_count = parsed.results.len(), "Raw Tavily response received");

        let results: Vec<WebResult> = parsed
            .results
            .into_iter()
            .filter_map(|r| {
                let url = r.url.filter(|u| !u.is_empty())?;
                Some(WebResult {
                    title: r.title.unwrap_or_else(|| "Untitled".to_string()),
                    url,
                    content: r.content.unwrap_or_default(),
                    score: r.score,
                })
            })
            .take(self.max_results)
            .collect();

        info!(count = results.len(), "Tavily search completed");
        Ok(results)
    }
}

/// Render results as the JSON payload of a tool message
pub fn format_results_for_tool(results: &[WebResult]) -> String {
    serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string())
}
