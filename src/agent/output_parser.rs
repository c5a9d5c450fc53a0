use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::agent::error::AgentError;
use crate::agent::output_types::{action_input_text, AgentAction};
use crate::agent::prompt::FINAL_ANSWER_ACTION;

fn fenced_block() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("fence pattern is valid")
    })
}

/// Parse one model reply into a tool call or a final answer.
///
/// Accepts a fenced ```json block, a bare JSON object, or a JSON object
/// embedded in surrounding prose.
pub fn parse(text: &str) -> Result<AgentAction, AgentError> {
    let value = extract_json(text).ok_or_else(|| AgentError::OutputParsing(text.to_string()))?;

    let action = value
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| AgentError::OutputParsing(text.to_string()))?;
    let input = value
        .get("action_input")
        .map(action_input_text)
        .unwrap_or_default();

    if action == FINAL_ANSWER_ACTION {
        Ok(AgentAction::Finish(input))
    } else {
        Ok(AgentAction::Tool {
            tool: action.to_string(),
            input,
        })
    }
}

fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();

    if let Some(captures) = fenced_block().captures(trimmed) {
        if let Some(value) = captures.get(1).and_then(|m| object(m.as_str())) {
            return Some(value);
        }
    }

    if let Some(value) = object(trimmed) {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    object(&trimmed[start..=end])
}

fn object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate.trim())
        .ok()
        .filter(Value::is_object)
}
