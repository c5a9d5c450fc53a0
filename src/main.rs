mod agent;
mod config;
mod conversations;
mod error;
mod handlers;
mod routes;
mod state;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_agent_backend=debug,tower_http=debug")),
        )
        .init();

    // Explicit CONFIG_PATH first, then the usual file names next to the binary's cwd
    let config_path = std::env::var("CONFIG_PATH").ok().or_else(|| {
        ["conf.yaml", "conf.yml", "conf.json"]
            .into_iter()
            .find(|candidate| std::path::Path::new(candidate).exists())
            .map(str::to_string)
    });

    let mut config = Config::load(config_path.as_deref())?;
    config.apply_credentials(|name| std::env::var(name).ok());
    config.validate()?;

    match &config_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let addr = config.listen_addr()?;
    let app = routes::create_app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server started on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
