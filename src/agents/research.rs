//! Research Agent
//!
//! Fetches current fitness and nutrition information for the user's profile:
//! regional food prices, gym costs, popular routines and recent guidelines.
//! When a Tavily key is configured the agent can call `tavily_search`;
//! otherwise it answers from model knowledge alone.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::agents::{ModelSettings, ReactAgent, Tool, RESEARCH_AGENT_NAME};
use crate::llm::LLMAdapter;
use crate::search::tavily::format_results_for_tool;
use crate::search::TavilyClient;
use crate::types::{AppError, AppResult, ToolSpec};

pub const WEB_SEARCH_TOOL_NAME: &str = "tavily_search";

const RESEARCH_SYSTEM_PROMPT: &str = r#"You are a research agent. Use Tavily and any other available internet resources to fetch the latest, most relevant fitness and nutrition information for the user's needs.
- Always prioritize up-to-date, actionable data from the current internet, including:
    - Food preferences and trending diets in the user's region
    - Typical gym membership costs and home workout alternatives
    - Cost-effective, budget-friendly meal options and food prices (in INR)
    - Popular exercises and routines for the user's goal and experience
    - Local/cultural foods and substitutions
    - Any recent scientific findings or government guidelines
- For ALL food and gym costs, always provide the price in INR (₹), with links to sources (grocery sites, government, news, etc.).
- Use multiple sources if possible, and always cite links for cost data.
- Summarize findings clearly and concisely for the plan generator, with sources and links where possible.
- If you can provide a direct answer from your knowledge base or research, do so. Otherwise, indicate if further research is needed or if you are done."#;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// `tavily_search` tool backed by [`TavilyClient`]
pub struct WebSearchTool {
    client: TavilyClient,
}

impl WebSearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: WEB_SEARCH_TOOL_NAME.to_string(),
            description: "A search engine optimized for comprehensive, accurate, and trusted results. \
                          Useful for answering questions about current events, prices and recent research. \
                          Input should be a search query."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query to look up"}
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, arguments: &str) -> AppResult<String> {
        let args: SearchArgs = serde_json::from_str(arguments)
            .map_err(|e| {
                AppError::InvalidRequest(format!("invalid {} arguments: {}", WEB_SEARCH_TOOL_NAME, e))
            })?;
        let results = self.client.search(&args.query).await?;
        Ok(format_results_for_tool(&results))
    }
}

/// Build the research agent; `search` adds the web search tool
pub fn research_agent(
    llm: Arc<dyn LLMAdapter>,
    settings: ModelSettings,
    search: Option<TavilyClient>,
    max_iterations: usize,
) -> ReactAgent {
    let agent = ReactAgent::new(RESEARCH_AGENT_NAME, RESEARCH_SYSTEM_PROMPT, llm, settings)
        .with_max_iterations(max_iterations);

    match search {
        Some(client) => agent.with_tool(Arc::new(WebSearchTool::new(client))),
        None => agent,
    }
}
