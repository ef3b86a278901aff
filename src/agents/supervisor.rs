//! Supervisor
//!
//! Routes the conversation between the research and plan agents. The
//! supervisor model sees the full history and hands off by calling a
//! `transfer_to_<agent>` tool; a plain answer ends the run. Every node
//! turn is emitted as a [`StreamedChunk`]:
//!
//! - supervisor turns carry the supervisor's new messages
//! - worker turns carry the full history including the worker's messages
//!   and a handoff-back pair

use async_stream::try_stream;
use futures::stream::BoxStream;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::agents::plan::plan_agent;
use crate::agents::research::research_agent;
use crate::agents::{
    AgentMessage, ModelSettings, ReactAgent, StreamedChunk, PLAN_AGENT_NAME, RESEARCH_AGENT_NAME,
    SUPERVISOR_NAME,
};
use crate::config::AgentConfig;
use crate::llm::LLMAdapter;
use crate::search::TavilyClient;
use crate::types::{AppResult, LLMRequest, ToolCall, ToolSpec};

const HANDOFF_PREFIX: &str = "transfer_to_";
const HANDOFF_BACK_TOOL: &str = "transfer_back_to_supervisor";

const SUPERVISOR_PROMPT: &str = "You are a supervisor managing two agents: a research agent (for web search and latest info) and a plan agent (for generating the personalized plan). \
Your primary role is to ensure the user receives a perfect, well-structured, and comprehensive fitness and nutrition plan. \
Workflow:\n\
1. When you receive user details, first consider if the 'research_agent' needs to be invoked to gather more information related to the user's goal, diet, or health conditions before the 'plan_agent' can create a comprehensive plan.\n\
2. After research, ensure all relevant user data and research findings are available in the messages before handing off to the 'plan_agent'.\n\
3. The 'plan_agent' will then generate the final personalized plan. Your FINAL output to the user MUST be ONLY the generated plan from the 'plan_agent', without any additional conversational text or preambles from yourself. Ensure the plan is complete and well-formatted. Do not do any work yourself beyond orchestrating the agents and presenting the final plan.";

pub struct Supervisor {
    llm: Arc<dyn LLMAdapter>,
    settings: ModelSettings,
    agents: Vec<ReactAgent>,
    max_handoffs: usize,
}

impl Supervisor {
    pub fn new(
        llm: Arc<dyn LLMAdapter>,
        settings: ModelSettings,
        search: Option<TavilyClient>,
        config: &AgentConfig,
    ) -> Self {
        let agents = vec![
            research_agent(llm.clone(), settings.clone(), search, config.max_tool_iterations),
            plan_agent(llm.clone(), settings.clone()),
        ];

        Self {
            llm,
            settings,
            agents,
            max_handoffs: config.max_handoffs,
        }
    }

    pub fn has_web_search(&self) -> bool {
        self.agent(RESEARCH_AGENT_NAME)
            .is_some_and(|agent| !agent.tool_names().is_empty())
    }

    fn agent(&self, name: &str) -> Option<&ReactAgent> {
        self.agents.iter().find(|agent| agent.name() == name)
    }

    fn handoff_tools(&self) -> Vec<ToolSpec> {
        self.agents
            .iter()
            .map(|agent| ToolSpec {
                name: format!("{}{}", HANDOFF_PREFIX, agent.name()),
                description: format!("Ask agent '{}' for help", agent.name()),
                parameters: json!({"type": "object", "properties": {}}),
            })
            .collect()
    }

    fn routing_request(&self, history: &[AgentMessage]) -> LLMRequest {
        let messages = history.iter().map(AgentMessage::to_llm_message).collect();
        self.settings
            .request(SUPERVISOR_PROMPT, messages, self.handoff_tools())
    }

    /// Stream the pipeline run for one seed message.
    ///
    /// The stream is finite: it ends when the supervisor answers without a
    /// handoff or after `max_handoffs` handoffs. Model failures end the
    /// stream with an error.
    pub fn stream(&self, seed: AgentMessage) -> BoxStream<'_, AppResult<StreamedChunk>> {
        Box::pin(try_stream! {
            let mut history = vec![seed];
            let mut handoffs = 0usize;

            loop {
                let request = self.routing_request(&history);
                let response = self.llm.create_chat_completion(&request).await?;
                let calls = response.tool_calls.clone();
                let decision = AgentMessage::ai_with_tools(
                    SUPERVISOR_NAME,
                    response.content,
                    response.tool_calls,
                );

                let call = match calls.first() {
                    Some(call) => call,
                    None => {
                        info!(handoffs, "Supervisor finished");
                        yield StreamedChunk::single(SUPERVISOR_NAME, vec![decision]);
                        break;
                    }
                };

                let target = call
                    .name
                    .strip_prefix(HANDOFF_PREFIX)
                    .and_then(|name| self.agent(name));
                let outcome = match target {
                    Some(agent) if handoffs >= self.max_handoffs => {
                        Handoff::LimitReached(agent.name())
                    }
                    Some(agent) => Handoff::Accepted(agent.name()),
                    None => Handoff::Unknown,
                };
                let mut turn = vec![decision];
                turn.extend(handoff_results(&calls, &outcome));
                history.extend(turn.iter().cloned());
                yield StreamedChunk::single(SUPERVISOR_NAME, turn);

                let agent = match (target, &outcome) {
                    (_, Handoff::LimitReached(_)) => {
                        warn!(max_handoffs = self.max_handoffs, "Handoff limit reached");
                        break;
                    }
                    (Some(agent), _) => agent,
                    (None, _) => {
                        warn!(tool = %call.name, "Supervisor requested unknown handoff");
                        handoffs += 1;
                        if handoffs >= self.max_handoffs {
                            warn!(max_handoffs = self.max_handoffs, "Handoff limit reached");
                            break;
                        }
                        continue;
                    }
                };

                handoffs += 1;
                info!(agent = %agent.name(), handoff = handoffs, "Handing off");

                let produced = agent.invoke(&history).await?;
                history.extend(produced);
                history.extend(handoff_back_messages(agent.name()));
                yield StreamedChunk::single(agent.name(), history.clone());
            }
        })
    }
}

/// What the supervisor does with the first handoff call of a turn
enum Handoff<'a> {
    Accepted(&'a str),
    LimitReached(&'a str),
    Unknown,
}

/// Tool results answering every call of a supervisor turn. Only the first
/// call is acted on.
fn handoff_results(calls: &[ToolCall], outcome: &Handoff<'_>) -> Vec<AgentMessage> {
    calls
        .iter()
        .enumerate()
        .map(|(i, call)| {
            let content = match (i, outcome) {
                (0, Handoff::Accepted(agent)) => format!("Successfully transferred to {}", agent),
                (0, Handoff::LimitReached(agent)) => {
                    format!("Handoff limit reached; {} was not invoked.", agent)
                }
                (0, Handoff::Unknown) => format!(
                    "Error: {} is not a valid tool, try one of [{}{}, {}{}].",
                    call.name, HANDOFF_PREFIX, RESEARCH_AGENT_NAME, HANDOFF_PREFIX, PLAN_AGENT_NAME
                ),
                _ => "Ignored: only one handoff is performed per turn.".to_string(),
            };
            AgentMessage::tool(call, content)
        })
        .collect()
}

fn handoff_back_messages(agent: &str) -> [AgentMessage; 2] {
    let call = ToolCall {
        id: uuid::Uuid::new_v4().to_string(),
        name: HANDOFF_BACK_TOOL.to_string(),
        arguments: "{}".to_string(),
    };
    [
        AgentMessage::ai_with_tools(agent, "Transferring back to supervisor", vec![call.clone()]),
        AgentMessage::tool(&call, "Successfully transferred back to supervisor"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::extract_plan;
    use crate::config::{test_config, DEFAULT_PLAN_MARKER};
    use crate::llm::scripted::ScriptedAdapter;
    use futures::{StreamExt, TryStreamExt};

    fn supervisor(llm: Arc<ScriptedAdapter>, max_handoffs: usize) -> Supervisor {
        let config = test_config();
        let agents = AgentConfig {
            max_handoffs,
            ..config.agents.clone()
        };
        Supervisor::new(llm, ModelSettings::from(&config.llm), None, &agents)
    }

    fn chunk_agents(chunks: &[StreamedChunk]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|c| c.agents().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    const PLAN: &str =
        "# Weekly Gym Training Plan\n| Day | Focus |\n# Weekly Meal Plan\n# Lifestyle Tips\n# Summary";

    #[tokio::test]
    async fn test_research_then_plan_flow() {
        let llm = Arc::new(ScriptedAdapter::new(vec![
            ScriptedAdapter::tool_call("h1", "transfer_to_research_agent", "{}"),
            ScriptedAdapter::text("Paneer costs ₹90 per 200g."),
            ScriptedAdapter::tool_call("h2", "transfer_to_plan_agent", "{}"),
            ScriptedAdapter::text(PLAN),
            ScriptedAdapter::text(PLAN),
        ]));
        let pipeline = supervisor(llm.clone(), 6);

        let chunks: Vec<StreamedChunk> = pipeline
            .stream(AgentMessage::human("User details:"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(
            chunk_agents(&chunks),
            vec![
                SUPERVISOR_NAME,
                RESEARCH_AGENT_NAME,
                SUPERVISOR_NAME,
                PLAN_AGENT_NAME,
                SUPERVISOR_NAME
            ]
        );
        assert_eq!(llm.remaining(), 0);

        // worker chunks carry the full history ending with the handoff back
        let plan_messages = &chunks[3].outputs[0].messages;
        assert_eq!(plan_messages[0], AgentMessage::human("User details:"));
        assert_eq!(
            plan_messages.last().unwrap().content(),
            "Successfully transferred back to supervisor"
        );

        assert_eq!(extract_plan(&chunks, DEFAULT_PLAN_MARKER).as_deref(), Some(PLAN));

        // the supervisor offers both handoff tools
        let first = &llm.requests()[0];
        let tools: Vec<&str> = first.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tools, vec!["transfer_to_research_agent", "transfer_to_plan_agent"]);
    }

    #[tokio::test]
    async fn test_direct_answer_ends_stream() {
        let llm = Arc::new(ScriptedAdapter::new(vec![ScriptedAdapter::text("No handoff needed")]));
        let pipeline = supervisor(llm, 6);

        let chunks: Vec<StreamedChunk> = pipeline
            .stream(AgentMessage::human("User details:"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(extract_plan(&chunks, DEFAULT_PLAN_MARKER), None);
    }

    #[tokio::test]
    async fn test_handoff_limit_bounds_the_run() {
        let llm = Arc::new(ScriptedAdapter::new(vec![
            ScriptedAdapter::tool_call("h1", "transfer_to_research_agent", "{}"),
            ScriptedAdapter::text("research 1"),
            ScriptedAdapter::tool_call("h2", "transfer_to_research_agent", "{}"),
        ]));
        let pipeline = supervisor(llm.clone(), 1);

        let chunks: Vec<StreamedChunk> = pipeline
            .stream(AgentMessage::human("User details:"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(
            chunk_agents(&chunks),
            vec![SUPERVISOR_NAME, RESEARCH_AGENT_NAME, SUPERVISOR_NAME]
        );
        assert_eq!(llm.remaining(), 0);

        // the refused handoff is answered as such, not as a transfer
        let refusal = &chunks[2].outputs[0].messages[1];
        assert_eq!(
            refusal.content(),
            "Handoff limit reached; research_agent was not invoked."
        );
    }

    #[tokio::test]
    async fn test_unknown_handoff_is_answered_and_loop_continues() {
        let llm = Arc::new(ScriptedAdapter::new(vec![
            ScriptedAdapter::tool_call("h1", "transfer_to_nutritionist", "{}"),
            ScriptedAdapter::text("giving up"),
        ]));
        let pipeline = supervisor(llm.clone(), 6);

        let chunks: Vec<StreamedChunk> = pipeline
            .stream(AgentMessage::human("User details:"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(chunks.len(), 2);
        let reply = &chunks[0].outputs[0].messages[1];
        assert!(reply.content().starts_with("Error: transfer_to_nutritionist is not a valid tool"));

        // the second routing request contains the error tool message
        let second = &llm.requests()[1];
        assert_eq!(second.messages.last().unwrap().role, "tool");
    }

    #[tokio::test]
    async fn test_worker_failure_ends_stream_with_error() {
        let llm = Arc::new(ScriptedAdapter::new(vec![
            ScriptedAdapter::tool_call("h1", "transfer_to_plan_agent", "{}"),
            Err(crate::types::AppError::LLMApi("quota exceeded".to_string())),
        ]));
        let pipeline = supervisor(llm, 6);

        let results: Vec<AppResult<StreamedChunk>> =
            pipeline.stream(AgentMessage::human("User details:")).collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().is_err_and(|e| e.to_string().contains("quota exceeded")));
    }

    #[test]
    fn test_extra_handoffs_are_ignored() {
        let call = |id: &str, name: &str| ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: "{}".to_string(),
        };
        let calls = vec![
            call("a", "transfer_to_plan_agent"),
            call("b", "transfer_to_research_agent"),
        ];
        let results = handoff_results(&calls, &Handoff::Accepted(PLAN_AGENT_NAME));
        assert_eq!(results[0].content(), "Successfully transferred to plan_agent");
        assert!(results[1].content().starts_with("Ignored"));
    }
}
