//! rmcp-weather: MCP server for current weather conditions
//!
//! Run with: `WEATHER_API_KEY=... rmcp-weather` (serves on stdio)

use rmcp::ServiceExt;
use rmcp_weather::WeatherServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the stdio transport
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting rmcp-weather server");

    // A missing .env is fine; a malformed one is not
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let server = WeatherServer::from_env();
    let service = server.serve(rmcp::transport::stdio()).await?;

    service.waiting().await?;

    tracing::info!("rmcp-weather server stopped");
    Ok(())
}
