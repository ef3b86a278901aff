use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::llm::groq;
use crate::types::LLMProvider;

pub const DEFAULT_PLAN_MARKER: &str = "# Weekly Gym Training Plan";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub agents: AgentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub model: String,
    pub groq_api_key: String,
    pub openai_api_key: String,
    /// Overrides the provider's default base URL
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub max_retries: u32,
}

// Keys are never printed.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl LLMConfig {
    /// API key for the selected provider, if one is configured
    pub fn active_api_key(&self) -> Option<String> {
        let key = match self.provider {
            LLMProvider::Groq => &self.groq_api_key,
            LLMProvider::OpenAI => &self.openai_api_key,
        };
        if key.trim().is_empty() {
            None
        } else {
            Some(key.clone())
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub tavily_api_key: Option<String>,
    pub api_base: Option<String>,
    pub max_results: usize,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("enabled", &self.is_enabled())
            .field("api_base", &self.api_base)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl SearchConfig {
    pub fn is_enabled(&self) -> bool {
        self.tavily_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on supervisor handoffs per request
    pub max_handoffs: usize,
    /// Upper bound on model/tool round trips inside one agent turn
    pub max_tool_iterations: usize,
    /// Substring identifying the final plan message
    pub plan_marker: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_handoffs: 6,
            max_tool_iterations: 5,
            plan_marker: DEFAULT_PLAN_MARKER.to_string(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let provider_id = var_or("LLM_PROVIDER", "groq");
        let provider = LLMProvider::from_id(&provider_id)
            .with_context(|| format!("Unsupported LLM_PROVIDER: {}", provider_id))?;

        Ok(Self {
            server: ServerConfig {
                port: var_or("PORT", "3000").parse().context("PORT must be a port number")?,
                host: var_or("HOST", "0.0.0.0"),
                cors_allowed_origins: var_or(
                    "ALLOWED_ORIGINS",
                    "http://localhost:3000,http://localhost:5173",
                )
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            },
            llm: LLMConfig {
                provider,
                model: var_or("LLM_MODEL", groq::models::DEFAULT),
                groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                api_base: non_empty_var("LLM_API_BASE"),
                max_tokens: var_or("LLM_MAX_TOKENS", "2000")
                    .parse()
                    .context("LLM_MAX_TOKENS must be an integer")?,
                temperature: non_empty_var("LLM_TEMPERATURE")
                    .map(|t| t.parse())
                    .transpose()
                    .context("LLM_TEMPERATURE must be a number")?,
                max_retries: var_or("LLM_MAX_RETRIES", "2")
                    .parse()
                    .context("LLM_MAX_RETRIES must be an integer")?,
            },
            search: SearchConfig {
                tavily_api_key: non_empty_var("TAVILY_API_KEY"),
                api_base: non_empty_var("TAVILY_API_BASE"),
                max_results: var_or("TAVILY_MAX_RESULTS", "3")
                    .parse()
                    .context("TAVILY_MAX_RESULTS must be an integer")?,
            },
            agents: AgentConfig {
                max_handoffs: var_or("MAX_HANDOFFS", "6")
                    .parse()
                    .context("MAX_HANDOFFS must be an integer")?,
                max_tool_iterations: var_or("MAX_TOOL_ITERATIONS", "5")
                    .parse()
                    .context("MAX_TOOL_ITERATIONS must be an integer")?,
                plan_marker: var_or("PLAN_MARKER", DEFAULT_PLAN_MARKER),
            },
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 3000,
            host: "127.0.0.1".to_string(),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        llm: LLMConfig {
            provider: LLMProvider::Groq,
            model: "llama-3.3-70b-versatile".to_string(),
            groq_api_key: "test-key".to_string(),
            openai_api_key: String::new(),
            api_base: None,
            max_tokens: 2000,
            temperature: None,
            max_retries: 0,
        },
        search: SearchConfig {
            tavily_api_key: None,
            api_base: None,
            max_results: 3,
        },
        agents: AgentConfig::default(),
    }
}
