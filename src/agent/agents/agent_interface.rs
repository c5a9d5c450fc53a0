use async_trait::async_trait;

use crate::agent::error::AgentError;
use crate::agent::input_types::ChatMessage;

/// Base interface for all agent implementations
#[async_trait]
pub trait AgentInterface: Send + Sync {
    /// Answer `input`, taking `chat_history` as prior conversation.
    ///
    /// Resolves once the agent has produced its final answer; tool calls and
    /// model round trips happen inside.
    async fn run(&self, input: &str, chat_history: &[ChatMessage]) -> Result<String, AgentError>;
}
