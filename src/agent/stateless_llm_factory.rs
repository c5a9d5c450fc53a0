use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::config::LlmConfig;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create the chat model described by `config`, sharing `client`'s connection pool.
    pub fn create_llm(client: Client, config: &LlmConfig) -> Arc<dyn StatelessLLMInterface> {
        info!("Initializing LLM: {}", config.model);
        Arc::new(OpenAICompatibleLLM::new(client, config))
    }
}
