use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::conversations::{seed_chat_history, system_context, PromptRequest, PromptResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /answer_prompt`
pub async fn answer_prompt(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let request = PromptRequest::from_value(&body)?;

    let request_id = Uuid::new_v4();
    async move {
        info!("Handling new request: {}", request.prompt);

        let context = system_context(&request.choices);
        info!(
            "System message included: {}",
            context.as_deref().unwrap_or_default()
        );
        let chat_history = seed_chat_history(context.as_deref());

        let result = match state.agents.create_agent() {
            Ok(agent) => {
                info!("Agent created");
                agent.run(&request.prompt, &chat_history).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(answer) => {
                info!("Answer: {}", answer);
                Ok(Json(PromptResponse { response: answer }))
            }
            Err(e) => {
                error!("Error: {}", e);
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(info_span!("answer_prompt", %request_id))
    .await
}

/// `GET /api/health`
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.config.llm.model,
    }))
}
