use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::agent::agents::{AgentInterface, ConversationalReactAgent};
use crate::agent::error::AgentError;
use crate::agent::stateless_llm_factory::StatelessLLMFactory;
use crate::agent::tools::{SerperSearch, ToolInterface};
use crate::config::Config;

/// Builds a fresh agent for every request.
///
/// Handlers depend on this trait so tests can swap in scripted agents.
pub trait AgentBuilder: Send + Sync {
    fn create_agent(&self) -> Result<Box<dyn AgentInterface>, AgentError>;
}

/// Factory for the search-backed conversational agent
pub struct AgentFactory {
    config: Config,
    client: Client,
}

impl AgentFactory {
    pub fn new(config: Config, client: Client) -> Self {
        Self { config, client }
    }
}

impl AgentBuilder for AgentFactory {
    fn create_agent(&self) -> Result<Box<dyn AgentInterface>, AgentError> {
        let agent_config = &self.config.agent;
        if agent_config.max_iterations == 0 {
            return Err(AgentError::Configuration(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        info!("Creating agent...");
        let llm = StatelessLLMFactory::create_llm(self.client.clone(), &self.config.llm);
        let tools: Vec<Arc<dyn ToolInterface>> = vec![Arc::new(SerperSearch::new(
            self.client.clone(),
            &self.config.search,
        ))];

        Ok(Box::new(ConversationalReactAgent::new(
            llm,
            tools,
            agent_config.max_iterations,
            agent_config.handle_parsing_errors,
        )))
    }
}
