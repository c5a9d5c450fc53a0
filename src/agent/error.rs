use thiserror::Error;

/// Failures raised while building or running an agent
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("invalid response from {0}")]
    InvalidResponse(String),

    #[error("could not parse LLM output: `{0}`")]
    OutputParsing(String),

    #[error("agent configuration error: {0}")]
    Configuration(String),
}
