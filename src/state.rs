use std::sync::Arc;

use crate::agent::{AgentBuilder, AgentFactory};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agents: Arc<dyn AgentBuilder>,
}

impl AppState {
    /// Production state: agents talk to the configured LLM and search endpoints.
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::new();
        let agents = Arc::new(AgentFactory::new(config.clone(), client));
        Self::with_agents(config, agents)
    }

    pub fn with_agents(config: Config, agents: Arc<dyn AgentBuilder>) -> Self {
        Self {
            config: Arc::new(config),
            agents,
        }
    }
}
