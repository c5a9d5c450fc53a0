use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agent::AgentError;

/// Errors surfaced to HTTP clients as `{"error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Missing choices")]
    MissingChoices,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Malformed choice at index {index}: {reason}")]
    MalformedChoice { index: usize, reason: &'static str },

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPrompt | ApiError::MissingChoices | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            // a choice that cannot yield context text fails the request like any agent error
            ApiError::MalformedChoice { .. } | ApiError::Agent(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
