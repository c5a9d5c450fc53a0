use serde_json::Value;

/// What the model asked for on one turn of the agent loop
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Call `tool` with `input`
    Tool { tool: String, input: String },
    /// Stop and return the answer
    Finish(String),
}

/// A tool call the executor already ran, kept for the scratchpad
#[derive(Debug, Clone)]
pub struct AgentStep {
    /// Raw model output that produced the action
    pub log: String,
    pub observation: String,
}

/// Render an `action_input` value as the text handed to a tool or returned to the caller.
pub fn action_input_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
