//! mcp-tools - agent tools over MCP
//!
//! A unified MCP server exposing the employee, search and weather tools on
//! one streamable HTTP endpoint.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod server;
mod transport;

use config::{ServerConfig, DOTENV_FILE};
use server::ToolsServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::load(DOTENV_FILE)?;

    if config.weather.api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; get_weather calls will fail");
    }
    if config.search.api_key.is_none() {
        tracing::warn!("TAVILY_API_KEY is not set; get_search_results calls will fail");
    }

    let router = transport::router(ToolsServer::new(&config), &config.path);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), path = %config.path, "mcp-tools starting...");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    tracing::info!("mcp-tools stopped");
    Ok(())
}
