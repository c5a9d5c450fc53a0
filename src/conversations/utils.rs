use super::types::Choice;
use crate::agent::ChatMessage;

/// Join the content of every system-role choice with single spaces, in order.
///
/// Returns `None` when the joined text is empty.
pub fn system_context(choices: &[Choice]) -> Option<String> {
    let joined = choices
        .iter()
        .filter(|choice| choice.is_system())
        .map(|choice| choice.content.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Chat history handed to the agent: at most one system message.
pub fn seed_chat_history(system_context: Option<&str>) -> Vec<ChatMessage> {
    system_context
        .map(|context| vec![ChatMessage::system(context)])
        .unwrap_or_default()
}
