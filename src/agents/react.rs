//! ReAct Agent
//!
//! A model that may call tools in a loop until it produces a plain answer.
//! Each tool result is appended as a `Tool` message so the conversation
//! stays valid for the next request.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::agents::AgentMessage;
use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::types::{AppResult, LLMMessage, LLMRequest, ToolCall, ToolSpec};

/// A callable tool exposed to an agent
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Execute with the raw JSON arguments emitted by the model
    async fn call(&self, arguments: &str) -> AppResult<String>;
}

/// Model parameters shared by every agent in a pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl From<&LLMConfig> for ModelSettings {
    fn from(config: &LLMConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: Some(config.max_tokens),
            temperature: config.temperature,
        }
    }
}

impl ModelSettings {
    pub fn request(
        &self,
        system: &str,
        messages: Vec<LLMMessage>,
        tools: Vec<ToolSpec>,
    ) -> LLMRequest {
        LLMRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_instruction: Some(system.to_string()),
            tools,
        }
    }
}

pub struct ReactAgent {
    name: String,
    system_prompt: String,
    /// Human turn appended after the shared history on every request
    closing_instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    llm: Arc<dyn LLMAdapter>,
    settings: ModelSettings,
    max_iterations: usize,
}

impl ReactAgent {
    pub fn new(
        name: &str,
        system_prompt: &str,
        llm: Arc<dyn LLMAdapter>,
        settings: ModelSettings,
    ) -> Self {
        Self {
            name: name.to_string(),
            system_prompt: system_prompt.to_string(),
            closing_instruction: None,
            tools: Vec::new(),
            llm,
            settings,
            max_iterations: 5,
        }
    }

    pub fn with_closing_instruction(mut self, instruction: &str) -> Self {
        self.closing_instruction = Some(instruction.to_string());
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.spec().name).collect()
    }

    /// Run the agent over `history`; returns only the messages it produced.
    pub async fn invoke(&self, history: &[AgentMessage]) -> AppResult<Vec<AgentMessage>> {
        info!(agent = %self.name, history_len = history.len(), "Agent invoked");

        let tool_specs: Vec<ToolSpec> = self.tools.iter().map(|t| t.spec()).collect();
        let mut produced: Vec<AgentMessage> = Vec::new();

        for iteration in 0..self.max_iterations {
            let mut messages: Vec<LLMMessage> = history
                .iter()
                .chain(produced.iter())
                .map(AgentMessage::to_llm_message)
                .collect();
            if let Some(instruction) = &self.closing_instruction {
                messages.push(LLMMessage::user(instruction.as_str()));
            }

            let request = self
                .settings
                .request(&self.system_prompt, messages, tool_specs.clone());
            let response = self.llm.create_chat_completion(&request).await?;

            debug!(
                agent = %self.name,
                iteration,
                content_len = response.content.len(),
                tool_calls = response.tool_calls.len(),
                "Agent step"
            );

            let tool_calls = response.tool_calls.clone();
            produced.push(AgentMessage::ai_with_tools(
                &self.name,
                response.content,
                response.tool_calls,
            ));

            if tool_calls.is_empty() {
                info!(agent = %self.name, steps = iteration + 1, "Agent finished");
                return Ok(produced);
            }

            for call in &tool_calls {
                produced.push(self.run_tool(call).await);
            }
        }

        warn!(
            agent = %self.name,
            max_iterations = self.max_iterations,
            "Agent stopped at iteration limit"
        );
        Ok(produced)
    }

    // Tool failures are reported back to the model instead of aborting the turn.
    async fn run_tool(&self, call: &ToolCall) -> AgentMessage {
        let tool = self.tools.iter().find(|t| t.spec().name == call.name);

        let content = match tool {
            Some(tool) => match tool.call(&call.arguments).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(agent = %self.name, tool = %call.name, error = %e, "Tool call failed");
                    format!("Error: {}", e)
                }
            },
            None => {
                warn!(agent = %self.name, tool = %call.name, "Model requested unknown tool");
                format!(
                    "Error: {} is not a valid tool, try one of [{}].",
                    call.name,
                    self.tool_names().join(", ")
                )
            }
        };

        AgentMessage::tool(call, content)
    }
}
