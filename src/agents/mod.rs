//! Agent System
//!
//! This module contains the agents that turn a user profile into a plan:
//!
//! - **Supervisor**: decides which specialist runs next, via handoff tools
//! - **Research Agent**: gathers current fitness, diet and cost information from the web
//! - **Plan Agent**: writes the final markdown gym and meal plan
//!
//! ## Pipeline Overview
//!
//! ```text
//! Seed prompt (user details + BMI)
//!      │
//!      ▼
//! ┌─────────────┐   transfer_to_research_agent   ┌─────────────┐
//! │ Supervisor  │ ─────────────────────────────▶ │  Research   │ → tavily_search
//! │             │ ◀───────────────────────────── │   Agent     │
//! │             │   transfer_to_plan_agent       └─────────────┘
//! │             │ ─────────────────────────────▶ ┌─────────────┐
//! │             │ ◀───────────────────────────── │ Plan Agent  │
//! └─────────────┘                                └─────────────┘
//!      │
//!      ▼
//! Stream of chunks → extract_plan → markdown plan
//! ```

pub mod extract;
pub mod message;
pub mod plan;
pub mod react;
pub mod research;
pub mod supervisor;

pub use extract::extract_plan;
pub use message::{AgentMessage, NodeOutput, StreamedChunk};
pub use react::{ModelSettings, ReactAgent, Tool};
pub use supervisor::Supervisor;

use futures::TryStreamExt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm::{create_adapter, LLMProviderConfig};
use crate::search::TavilyClient;
use crate::types::{AppError, AppResult};

pub const SUPERVISOR_NAME: &str = "supervisor";
pub const RESEARCH_AGENT_NAME: &str = "research_agent";
pub const PLAN_AGENT_NAME: &str = "plan_agent";

/// Build the supervisor pipeline from configuration.
///
/// Fails when the configured LLM provider has no API key. Web search is
/// optional: without a Tavily key the research agent runs without tools.
pub fn build_pipeline(config: &Config) -> AppResult<Supervisor> {
    let provider = LLMProviderConfig::from_config(&config.llm)?;
    let llm = create_adapter(provider);

    let search = TavilyClient::from_config(&config.search);
    if search.is_none() {
        warn!("TAVILY_API_KEY not set, research agent will run without web search");
    }

    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        web_search = search.is_some(),
        max_handoffs = config.agents.max_handoffs,
        "Agent pipeline initialized"
    );

    Ok(Supervisor::new(
        llm,
        ModelSettings::from(&config.llm),
        search,
        &config.agents,
    ))
}

/// Run the pipeline for one seed prompt and return the extracted plan.
///
/// The chunk stream is drained to completion before it is scanned.
pub async fn execute_plan_pipeline(
    pipeline: &Supervisor,
    seed_prompt: String,
    plan_marker: &str,
) -> AppResult<String> {
    info!(prompt_len = seed_prompt.len(), "Starting plan pipeline");

    let chunks: Vec<StreamedChunk> = pipeline
        .stream(AgentMessage::human(seed_prompt))
        .try_collect()
        .await?;

    info!(chunk_count = chunks.len(), "Plan pipeline finished");

    match extract_plan(&chunks, plan_marker) {
        Some(plan) => {
            info!(plan_len = plan.len(), "Extracted final plan");
            Ok(plan)
        }
        None => {
            warn!(
                chunk_count = chunks.len(),
                marker = %plan_marker,
                "No plan found in agent output"
            );
            Err(AppError::PlanNotFound)
        }
    }
}

/// Shared handle used by the web layer and the CLI
pub type PipelineHandle = Arc<Supervisor>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::llm::scripted::ScriptedAdapter;

    #[test]
    fn test_build_pipeline_requires_llm_key() {
        let mut config = test_config();
        config.llm.groq_api_key = String::new();
        assert!(matches!(build_pipeline(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_build_pipeline_without_search() {
        let config = test_config();
        let pipeline = tokio_test::assert_ok!(build_pipeline(&config));
        assert!(!pipeline.has_web_search());

        let mut config = test_config();
        config.search.tavily_api_key = Some("tvly-test".to_string());
        let pipeline = tokio_test::assert_ok!(build_pipeline(&config));
        assert!(pipeline.has_web_search());
    }

    #[tokio::test]
    async fn test_execute_pipeline_reports_missing_plan() {
        let llm = Arc::new(ScriptedAdapter::new(vec![ScriptedAdapter::text(
            "I cannot help with that.",
        )]));
        let config = test_config();
        let pipeline = Supervisor::new(llm, ModelSettings::from(&config.llm), None, &config.agents);

        let err = execute_plan_pipeline(
            &pipeline,
            "User details:".to_string(),
            "# Weekly Gym Training Plan",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::PlanNotFound));
    }

    #[tokio::test]
    async fn test_execute_pipeline_propagates_llm_failure() {
        let llm = Arc::new(ScriptedAdapter::new(vec![Err(AppError::LLMApi(
            "rate limited".to_string(),
        ))]));
        let config = test_config();
        let pipeline = Supervisor::new(llm, ModelSettings::from(&config.llm), None, &config.agents);

        let err = execute_plan_pipeline(&pipeline, "User details:".to_string(), "# Weekly")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "LLM API error: rate limited");
    }
}
