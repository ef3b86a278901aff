// In-memory adapter replaying canned responses, for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage, ToolCall};

pub struct ScriptedAdapter {
    responses: Mutex<VecDeque<AppResult<LLMResponse>>>,
    requests: Mutex<Vec<LLMRequest>>,
}

impl ScriptedAdapter {
    pub fn new(responses: Vec<AppResult<LLMResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(content: &str) -> AppResult<LLMResponse> {
        Ok(LLMResponse {
            content: content.to_string(),
            finish_reason: "stop".to_string(),
            tool_calls: vec![],
            usage: TokenUsage::default(),
        })
    }

    pub fn tool_call(id: &str, name: &str, arguments: &str) -> AppResult<LLMResponse> {
        Ok(LLMResponse {
            content: String::new(),
            finish_reason: "tool_calls".to_string(),
            tool_calls: vec![ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: arguments.to_string(),
            }],
            usage: TokenUsage::default(),
        })
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMAdapter for ScriptedAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::LLMApi("script exhausted".to_string())))
    }
}
