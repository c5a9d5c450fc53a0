use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// One entry of the `choices` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub role: String,
    /// Normalized text; `None` when the entry carried no usable text
    pub content: Option<String>,
}

impl Choice {
    #[cfg(test)]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
        }
    }

    pub fn is_system(&self) -> bool {
        self.role.eq_ignore_ascii_case("system")
    }
}

/// Validated body of `POST /answer_prompt`
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub prompt: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub response: String,
}

impl PromptRequest {
    /// Validate a raw JSON body. `prompt` is checked before `choices`.
    pub fn from_value(body: &Value) -> Result<Self, ApiError> {
        if !body.is_object() {
            return Err(ApiError::InvalidBody(
                "request body must be a JSON object".to_string(),
            ));
        }

        let prompt = body
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .ok_or(ApiError::MissingPrompt)?;

        let raw_choices = body
            .get("choices")
            .and_then(Value::as_array)
            .filter(|c| !c.is_empty())
            .ok_or(ApiError::MissingChoices)?;

        let choices = raw_choices
            .iter()
            .enumerate()
            .map(|(index, raw)| parse_choice(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prompt: prompt.to_string(),
            choices,
        })
    }
}

fn parse_choice(index: usize, raw: &Value) -> Result<Choice, ApiError> {
    let entry = raw.as_object().ok_or(ApiError::MalformedChoice {
        index,
        reason: "expected an object",
    })?;

    let role = entry
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let content = entry.get("content").and_then(content_text);

    let choice = Choice { role, content };
    if choice.is_system() && choice.content.is_none() {
        return Err(ApiError::MalformedChoice {
            index,
            reason: "system content must be a string or a list of strings",
        });
    }
    Ok(choice)
}

/// Content is either a string or a list of strings joined with spaces.
fn content_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => parts
            .iter()
            .map(|part| part.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(" ")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_is_checked_first() {
        let err = PromptRequest::from_value(&json!({})).unwrap_err();
        assert!(matches!(err, ApiError::MissingPrompt));

        let err = PromptRequest::from_value(&json!({"prompt": "", "choices": []})).unwrap_err();
        assert!(matches!(err, ApiError::MissingPrompt));

        let err = PromptRequest::from_value(&json!({"prompt": 42, "choices": [{}]})).unwrap_err();
        assert!(matches!(err, ApiError::MissingPrompt));
    }

    #[test]
    fn choices_must_be_a_non_empty_array() {
        for body in [
            json!({"prompt": "hi"}),
            json!({"prompt": "hi", "choices": []}),
            json!({"prompt": "hi", "choices": null}),
            json!({"prompt": "hi", "choices": "system"}),
        ] {
            let err = PromptRequest::from_value(&body).unwrap_err();
            assert!(matches!(err, ApiError::MissingChoices), "{body}");
        }
    }

    #[test]
    fn non_object_body_is_invalid() {
        let err = PromptRequest::from_value(&json!(["prompt"])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn content_lists_are_flattened() {
        let request = PromptRequest::from_value(&json!({
            "prompt": "hi",
            "choices": [
                {"role": "System", "content": ["Respond in pirate talk!", "Respond backwards."]},
                {"role": "assistant", "content": 7},
                {"content": "no role"}
            ]
        }))
        .unwrap();

        assert_eq!(request.prompt, "hi");
        assert_eq!(
            request.choices,
            vec![
                Choice::new("System", "Respond in pirate talk! Respond backwards."),
                Choice {
                    role: "assistant".to_string(),
                    content: None
                },
                Choice::new("", "no role"),
            ]
        );
    }

    #[test]
    fn system_entries_need_text_content() {
        let err = PromptRequest::from_value(&json!({
            "prompt": "hi",
            "choices": [{"role": "user", "content": "ok"}, {"role": "SYSTEM"}]
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed choice at index 1: system content must be a string or a list of strings"
        );

        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let err = PromptRequest::from_value(&json!({"prompt": "hi", "choices": ["system"]}))
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedChoice { index: 0, .. }));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
