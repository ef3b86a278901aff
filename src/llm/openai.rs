// OpenAI-compatible chat completions adapter
// Used directly for OpenAI and wrapped by the Groq adapter.
// API Reference: https://platform.openai.com/docs/api-reference/chat/create

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::provider::LLMAdapter;
use crate::types::{
    AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage, ToolCall, ToolSpec,
};
use crate::utils::{with_retry, RetryPolicy};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    api_base: String,
    retry: RetryPolicy,
}

// Request types

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ChatTool<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    // Assistant turns that only carry tool calls send `null` content
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ChatTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ChatFunction<'a>,
}

#[derive(Serialize)]
struct ChatFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

// Response types

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Failure of a single HTTP attempt, classified for retries
#[derive(Debug)]
enum CallError {
    Transport(String),
    Status { status: StatusCode, message: String },
    Parse(String),
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::Transport(e) => write!(f, "request failed: {}", e),
            CallError::Status { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            CallError::Parse(e) => write!(f, "failed to parse response: {}", e),
        }
    }
}

impl CallError {
    fn is_retryable(&self) -> bool {
        match self {
            CallError::Transport(_) => true,
            CallError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            CallError::Parse(_) => false,
        }
    }
}

impl OpenAIAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::new_with_api_base(api_key, OPENAI_API_BASE)
    }

    pub fn new_with_api_base(api_key: &str, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default().with_max_retries(0),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn convert_message(msg: &LLMMessage) -> ChatMessage<'_> {
        let tool_calls: Vec<WireToolCall> = msg
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                id: call.id.clone(),
                kind: function_kind(),
                function: WireFunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            })
            .collect();

        let content = if msg.content.is_empty() && !tool_calls.is_empty() {
            None
        } else {
            Some(msg.content.as_str())
        };

        ChatMessage {
            role: msg.role.as_str(),
            content,
            tool_calls,
            tool_call_id: msg.tool_call_id.as_deref(),
        }
    }

    fn convert_tool(tool: &ToolSpec) -> ChatTool<'_> {
        ChatTool {
            kind: "function",
            function: ChatFunction {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.parameters,
            },
        }
    }

    async fn send_once(&self, body: &ChatRequest<'_>) -> Result<ChatResponse, CallError> {
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&error_text) {
                Ok(parsed) => match parsed.error.code {
                    Some(code) => format!("{} (code: {})", parsed.error.message, code),
                    None => parsed.error.message,
                },
                Err(_) => error_text,
            };
            return Err(CallError::Status { status, message });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| CallError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let system = request.system_instruction.as_deref().map(LLMMessage::system);
        let messages: Vec<ChatMessage> = system
            .iter()
            .chain(request.messages.iter())
            .map(Self::convert_message)
            .collect();

        let body = ChatRequest {
            model: &request.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: request.tools.iter().map(Self::convert_tool).collect(),
            stream: false,
        };

        debug!(
            model = %request.model,
            message_count = body.messages.len(),
            tool_count = body.tools.len(),
            "Sending chat completion request"
        );

        let response = with_retry(self.retry, || self.send_once(&body), CallError::is_retryable)
            .await
            .map_err(|e| AppError::LLMApi(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("Model returned no choices".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            tool_calls,
            usage,
        })
    }
}
