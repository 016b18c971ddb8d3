use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::agent::stateless_llm::claude_llm::ClaudeLLM;
use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::config::LLMConfig;

const CLAUDE_BASE_URL: &str = "https://api.anthropic.com";

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configured provider.
    pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", config.llm_provider);

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        match config.llm_provider.as_str() {
            "openai_compatible_llm" | "openai_llm" | "groq_llm" | "ollama_llm"
            | "deepseek_llm" => Ok(Arc::new(OpenAICompatibleLLM::new(
                client,
                config.model.clone(),
                config.base_url.clone(),
                config.llm_api_key.clone(),
                config.organization_id.clone(),
                config.temperature,
            ))),
            "claude_llm" => {
                // The OpenAI default makes no sense for Anthropic
                let base_url = if config.base_url.contains("api.openai.com") {
                    CLAUDE_BASE_URL.to_string()
                } else {
                    config.base_url.clone()
                };
                Ok(Arc::new(ClaudeLLM::new(
                    client,
                    base_url,
                    config.model.clone(),
                    config.llm_api_key.clone(),
                    config.max_tokens,
                )))
            }
            _ => Err(anyhow::anyhow!(
                "Unsupported LLM provider: {}",
                config.llm_provider
            )),
        }
    }
}
