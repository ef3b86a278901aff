use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};
use crate::utils::RetryPolicy;

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub provider: LLMProvider,
    pub api_key: String,
    pub api_base: Option<String>,
    pub retry: RetryPolicy,
}

impl LLMProviderConfig {
    /// Provider settings for the configured provider; fails when its key is missing
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let api_key = config.active_api_key().ok_or_else(|| {
            AppError::Config(format!(
                "No API key configured for LLM provider '{}'",
                config.provider
            ))
        })?;

        Ok(Self {
            provider: config.provider,
            api_key,
            api_base: config.api_base.clone(),
            retry: RetryPolicy::default().with_max_retries(config.max_retries),
        })
    }
}

/// Build the adapter for a provider
pub fn create_adapter(config: LLMProviderConfig) -> Arc<dyn LLMAdapter> {
    match config.provider {
        LLMProvider::Groq => {
            let adapter = match config.api_base {
                Some(base) => crate::llm::groq::GroqAdapter::with_api_base(&config.api_key, &base),
                None => crate::llm::groq::GroqAdapter::new(&config.api_key),
            };
            Arc::new(adapter.with_retry(config.retry))
        }
        LLMProvider::OpenAI => {
            let adapter = match config.api_base {
                Some(base) => {
                    crate::llm::openai::OpenAIAdapter::new_with_api_base(&config.api_key, &base)
                }
                None => crate::llm::openai::OpenAIAdapter::new(&config.api_key),
            };
            Arc::new(adapter.with_retry(config.retry))
        }
    }
}
