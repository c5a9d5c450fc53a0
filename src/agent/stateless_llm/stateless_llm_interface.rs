use async_trait::async_trait;

use crate::agent::error::AgentError;
use crate::agent::input_types::ChatMessage;

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Generate a chat completion for `messages`, halting at any of `stop`.
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        stop: &[String],
    ) -> Result<String, AgentError>;
}
