use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment prefix for overrides, e.g. `SEARCH_AGENT__LLM__MODEL`.
pub const ENV_PREFIX: &str = "SEARCH_AGENT";

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid listen address {0}")]
    InvalidAddress(String),
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

/// Settings for the OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    #[serde(rename = "llm_api_key")]
    pub api_key: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-1106".to_string(),
            temperature: 0.3,
            api_key: String::new(),
        }
    }
}

/// Settings for the Serper web search API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: String,
    pub gl: String,
    pub hl: String,
    pub num_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://google.serper.dev".to_string(),
            api_key: String::new(),
            gl: "us".to_string(),
            hl: "en".to_string(),
            num_results: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_iterations: usize,
    pub handle_parsing_errors: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            handle_parsing_errors: true,
        }
    }
}

impl Config {
    /// Load configuration from an optional file plus `SEARCH_AGENT__*` variables.
    ///
    /// Missing files are not an error: every field has a default.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            let format = if path.to_lowercase().ends_with(".json") {
                ::config::FileFormat::Json
            } else {
                ::config::FileFormat::Yaml
            };
            builder = builder.add_source(
                ::config::File::from(Path::new(path))
                    .format(format)
                    .required(false),
            );
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Fill credentials from the conventional provider variables when set.
    pub fn apply_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(OPENAI_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.llm.api_key = key;
        }
        if let Some(key) = lookup(SERPER_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.search.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(OPENAI_API_KEY_ENV));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(SERPER_API_KEY_ENV));
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidAddress(addr))
    }
}
