use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::agent_interface::AgentInterface;
use crate::agent::error::AgentError;
use crate::agent::input_types::ChatMessage;
use crate::agent::output_parser;
use crate::agent::output_types::{AgentAction, AgentStep};
use crate::agent::prompt::{self, OBSERVATION_STOP};
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::tools::ToolInterface;

pub const ITERATION_LIMIT_ANSWER: &str = "Agent stopped due to iteration limit or time limit.";
pub const INVALID_RESPONSE_OBSERVATION: &str = "Invalid or incomplete response";

/// Conversational ReAct agent.
///
/// Each turn the model either names a tool to call or gives a final answer;
/// tool results are fed back until an answer arrives or the iteration cap hits.
pub struct ConversationalReactAgent {
    llm: Arc<dyn StatelessLLMInterface>,
    tools: Vec<Arc<dyn ToolInterface>>,
    max_iterations: usize,
    handle_parsing_errors: bool,
}

impl ConversationalReactAgent {
    pub fn new(
        llm: Arc<dyn StatelessLLMInterface>,
        tools: Vec<Arc<dyn ToolInterface>>,
        max_iterations: usize,
        handle_parsing_errors: bool,
    ) -> Self {
        info!(
            "ConversationalReactAgent initialized with tools: [{}]",
            tools.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
        );
        Self {
            llm,
            tools,
            max_iterations,
            handle_parsing_errors,
        }
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn ToolInterface>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    fn unknown_tool_observation(&self, name: &str) -> String {
        let names = self
            .tools
            .iter()
            .map(|tool| tool.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} is not a valid tool, try one of [{}].", name, names)
    }
}

#[async_trait]
impl AgentInterface for ConversationalReactAgent {
    async fn run(&self, input: &str, chat_history: &[ChatMessage]) -> Result<String, AgentError> {
        let tool_refs: Vec<&dyn ToolInterface> = self.tools.iter().map(|t| t.as_ref()).collect();
        let stop = vec![OBSERVATION_STOP.to_string()];
        let mut steps: Vec<AgentStep> = Vec::new();

        for iteration in 0..self.max_iterations {
            let messages = prompt::build_messages(&tool_refs, input, chat_history, &steps);
            let output = self.llm.chat_completion(&messages, &stop).await?;
            debug!("Agent iteration {}: {}", iteration + 1, output);

            let observation = match output_parser::parse(&output) {
                Ok(AgentAction::Finish(answer)) => return Ok(answer),
                Ok(AgentAction::Tool { tool, input: tool_input }) => match self.find_tool(&tool) {
                    Some(found) => {
                        info!("Invoking tool '{}' with input: {}", tool, tool_input);
                        found.call(&tool_input).await?
                    }
                    None => {
                        warn!("Model requested unknown tool '{}'", tool);
                        self.unknown_tool_observation(&tool)
                    }
                },
                Err(err) if self.handle_parsing_errors => {
                    warn!("{}", err);
                    INVALID_RESPONSE_OBSERVATION.to_string()
                }
                Err(err) => return Err(err),
            };

            debug!("Observation: {}", observation);
            steps.push(AgentStep {
                log: output,
                observation,
            });
        }

        warn!("Agent hit the iteration limit of {}", self.max_iterations);
        Ok(ITERATION_LIMIT_ANSWER.to_string())
    }
}
