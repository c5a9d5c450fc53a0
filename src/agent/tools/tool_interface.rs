use async_trait::async_trait;

use crate::agent::error::AgentError;

/// A named callable the agent may invoke between model turns
#[async_trait]
pub trait ToolInterface: Send + Sync {
    /// Name the model uses in its `action` field
    fn name(&self) -> &str;

    /// One-line description shown to the model
    fn description(&self) -> &str;

    async fn call(&self, input: &str) -> Result<String, AgentError>;
}
