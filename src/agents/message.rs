use serde::Serialize;

use crate::types::{LLMMessage, ToolCall};

/// A message in the shared agent conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentMessage {
    Human {
        content: String,
    },
    Ai {
        /// Agent that produced the message
        name: Option<String>,
        content: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        name: String,
        tool_call_id: String,
        content: String,
    },
}

impl AgentMessage {
    pub fn human(content: impl Into<String>) -> Self {
        AgentMessage::Human {
            content: content.into(),
        }
    }

    pub fn ai(name: &str, content: impl Into<String>) -> Self {
        AgentMessage::Ai {
            name: Some(name.to_string()),
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn ai_with_tools(
        name: &str,
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        AgentMessage::Ai {
            name: Some(name.to_string()),
            content: content.into(),
            tool_calls,
        }
    }

    pub fn tool(call: &ToolCall, content: impl Into<String>) -> Self {
        AgentMessage::Tool {
            name: call.name.clone(),
            tool_call_id: call.id.clone(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            AgentMessage::Human { content }
            | AgentMessage::Ai { content, .. }
            | AgentMessage::Tool { content, .. } => content,
        }
    }

    /// Wire representation for chat completion requests
    pub fn to_llm_message(&self) -> LLMMessage {
        match self {
            AgentMessage::Human { content } => LLMMessage::user(content.as_str()),
            AgentMessage::Ai {
                content,
                tool_calls,
                ..
            } => LLMMessage::assistant_with_tools(content.as_str(), tool_calls.clone()),
            AgentMessage::Tool {
                name,
                tool_call_id,
                content,
            } => LLMMessage::tool(tool_call_id.as_str(), name.as_str(), content.as_str()),
        }
    }
}

/// Messages emitted by one named pipeline node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutput {
    pub agent: String,
    pub messages: Vec<AgentMessage>,
}

/// One unit of streamed pipeline output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamedChunk {
    pub outputs: Vec<NodeOutput>,
}

impl StreamedChunk {
    pub fn single(agent: &str, messages: Vec<AgentMessage>) -> Self {
        Self {
            outputs: vec![NodeOutput {
                agent: agent.to_string(),
                messages,
            }],
        }
    }

    /// Names of the nodes contributing to this chunk, in order
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.agent.as_str())
    }
}
