use async_trait::async_trait;

use crate::llm::openai::OpenAIAdapter;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppResult, LLMRequest, LLMResponse};
use crate::utils::RetryPolicy;

pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq exposes an OpenAI-compatible chat completions API
pub struct GroqAdapter {
    inner: OpenAIAdapter,
}

impl GroqAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_api_base(api_key, GROQ_API_BASE)
    }

    pub fn with_api_base(api_key: &str, api_base: &str) -> Self {
        Self {
            inner: OpenAIAdapter::new_with_api_base(api_key, api_base),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry(retry);
        self
    }
}

#[async_trait]
impl LLMAdapter for GroqAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.inner.create_chat_completion(request).await
    }
}

/// Models served by Groq that support tool calling
pub mod models {
    pub const LLAMA_3_3_70B_VERSATILE: &str = "llama-3.3-70b-versatile";

    pub const DEFAULT: &str = LLAMA_3_3_70B_VERSATILE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    #[tokio::test]
    async fn test_delegates_to_openai_compatible_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer gsk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}],
                    "usage":{"prompt_tokens":3,"completion_tokens":1,"total_tokens":4}}"#,
            )
            .create_async()
            .await;

        let adapter = GroqAdapter::with_api_base("gsk-test", &server.url());
        let request = LLMRequest {
            model: models::DEFAULT.to_string(),
            messages: vec![LLMMessage::user("hello")],
            max_tokens: Some(2000),
            temperature: None,
            system_instruction: None,
            tools: vec![],
        };
        let response = adapter.create_chat_completion(&request).await.unwrap();

        assert_eq!(response.content, "hi");
        assert_eq!(response.usage.total_tokens, 4);
        mock.assert_async().await;
    }
}
