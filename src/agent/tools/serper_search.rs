use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::tool_interface::ToolInterface;
use crate::agent::error::AgentError;
use crate::config::SearchConfig;

pub const SEARCH_TOOL_NAME: &str = "Intermediate Answer";
pub const SEARCH_TOOL_DESCRIPTION: &str = "useful for when you need to ask with search";
pub const NO_RESULT: &str = "No good Google Search Result was found";

/// Google search through the Serper API
pub struct SerperSearch {
    client: Client,
    base_url: String,
    api_key: String,
    gl: String,
    hl: String,
    num_results: u32,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    num: u32,
}

impl SerperSearch {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        info!("Initialized SerperSearch: base_url={}", config.base_url);
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            gl: config.gl.clone(),
            hl: config.hl.clone(),
            num_results: config.num_results,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Value, AgentError> {
        let url = format!("{}/search", self.base_url);
        let body = SearchRequest {
            q: query,
            gl: &self.gl,
            hl: &self.hl,
            num: self.num_results,
        };

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream {
                service: "search",
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ToolInterface for SerperSearch {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        SEARCH_TOOL_DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, AgentError> {
        debug!("Searching for: {}", input);
        let results = self.search(input).await?;
        Ok(render_results(&results))
    }
}

/// Flatten a Serper response into the text the agent reads as an observation.
///
/// A direct answer box wins outright; otherwise knowledge graph facts and
/// organic snippets are concatenated.
pub fn render_results(results: &Value) -> String {
    if let Some(answer_box) = results.get("answerBox") {
        let text = |key: &str| {
            answer_box
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };
        let direct = text("answer")
            .map(str::to_string)
            .or_else(|| text("snippet").map(|s| s.replace('\n', " ")))
            .or_else(|| {
                answer_box
                    .get("snippetHighlighted")
                    .map(|v| match v {
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(" "),
                        other => scalar_text(other),
                    })
            });
        if let Some(answer) = direct {
            return answer;
        }
    }

    let mut snippets = Vec::new();

    if let Some(kg) = results.get("knowledgeGraph") {
        let title = kg.get("title").and_then(Value::as_str).unwrap_or_default();
        if let Some(entity_type) = kg.get("type").and_then(Value::as_str) {
            snippets.push(format!("{}: {}.", title, entity_type));
        }
        if let Some(description) = kg.get("description").and_then(Value::as_str) {
            snippets.push(description.to_string());
        }
        if let Some(Value::Object(attributes)) = kg.get("attributes") {
            for (attribute, value) in attributes {
                snippets.push(format!("{} {}: {}.", title, attribute, scalar_text(value)));
            }
        }
    }

    if let Some(Value::Array(organic)) = results.get("organic") {
        for result in organic {
            if let Some(snippet) = result.get("snippet").and_then(Value::as_str) {
                snippets.push(snippet.to_string());
            }
            if let Some(Value::Object(attributes)) = result.get("attributes") {
                for (attribute, value) in attributes {
                    snippets.push(format!("{}: {}.", attribute, scalar_text(value)));
                }
            }
        }
    }

    if snippets.is_empty() {
        NO_RESULT.to_string()
    } else {
        snippets.join(" ")
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_box_answer_wins() {
        let results = json!({
            "answerBox": {"answer": "18°C", "snippet": "ignored"},
            "organic": [{"snippet": "also ignored"}]
        });
        assert_eq!(render_results(&results), "18°C");
    }

    #[test]
    fn answer_box_falls_back_to_highlights() {
        let results = json!({
            "answerBox": {"snippetHighlighted": ["Paris", "France"]}
        });
        assert_eq!(render_results(&results), "Paris France");
    }

    #[test]
    fn empty_answer_falls_through_to_snippet() {
        let results = json!({
            "answerBox": {"answer": "", "snippet": "Sunny spells\nwith a breeze"}
        });
        assert_eq!(render_results(&results), "Sunny spells with a breeze");
    }

    #[test]
    fn attributes_keep_response_order() {
        let results = json!({
            "knowledgeGraph": {
                "title": "Bristol",
                "attributes": {"Population": "472,400", "Area": "110 km2"}
            },
            "organic": [
                {"snippet": "Port city.", "attributes": {"Mayor": "Marvin Rees", "Founded": "1155"}}
            ]
        });
        assert_eq!(
            render_results(&results),
            "Bristol Population: 472,400. Bristol Area: 110 km2. \
             Port city. Mayor: Marvin Rees. Founded: 1155."
        );
    }

    #[test]
    fn knowledge_graph_and_organic_are_joined() {
        let results = json!({
            "knowledgeGraph": {
                "title": "Bristol",
                "type": "City in England",
                "description": "Bristol is a city in the South West.",
                "attributes": {"Population": "472,400"}
            },
            "organic": [
                {"snippet": "First snippet.", "attributes": {"Founded": "1155"}},
                {"title": "no snippet here"},
                {"snippet": "Second snippet."}
            ]
        });

        assert_eq!(
            render_results(&results),
            "Bristol: City in England. Bristol is a city in the South West. \
             Bristol Population: 472,400. First snippet. Founded: 1155. Second snippet."
        );
    }

    #[test]
    fn empty_results_report_nothing_found() {
        assert_eq!(render_results(&json!({"organic": []})), NO_RESULT);
        assert_eq!(render_results(&json!({"answerBox": {}})), NO_RESULT);
    }

    #[test]
    fn request_body_uses_serper_field_names() {
        let body = SearchRequest {
            q: "weather in Bristol",
            gl: "us",
            hl: "en",
            num: 10,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"q": "weather in Bristol", "gl": "us", "hl": "en", "num": 10})
        );
    }


    use crate::agent::test_upstream::spawn_upstream;
    use axum::http::{Method, StatusCode};

    fn search_for(base_url: &str) -> SerperSearch {
        let config = SearchConfig {
            base_url: base_url.to_string(),
            api_key: "serper-test".to_string(),
            ..SearchConfig::default()
        };
        SerperSearch::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn call_posts_query_with_api_key() {
        let reply = r#"{"answerBox": {"answer": "18°C"}}"#;
        let (base_url, log) = spawn_upstream(StatusCode::OK, reply).await;

        let observation = search_for(&base_url).call("weather in Bristol").await.unwrap();

        assert_eq!(observation, "18°C");
        let requests = log.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/search");
        assert_eq!(request.header("x-api-key"), Some("serper-test"));
        assert_eq!(
            request.body,
            json!({"q": "weather in Bristol", "gl": "us", "hl": "en", "num": 10})
        );
    }

    #[tokio::test]
    async fn error_status_becomes_upstream_error() {
        let (base_url, _log) = spawn_upstream(StatusCode::FORBIDDEN, "Unauthorized.").await;

        let err = search_for(&base_url).call("anything").await.unwrap_err();

        match err {
            AgentError::Upstream { service, status, body } => {
                assert_eq!(service, "search");
                assert_eq!(status, 403);
                assert_eq!(body, "Unauthorized.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
