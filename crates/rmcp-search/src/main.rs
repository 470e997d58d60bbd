//! rmcp-search: MCP server for web search
//!
//! Run with: `TAVILY_API_KEY=... rmcp-search` (serves on stdio)

use rmcp::ServiceExt;
use rmcp_search::SearchServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting rmcp-search server");

    // A missing .env is fine; a malformed one is not
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let server = SearchServer::from_env();
    let service = server.serve(rmcp::transport::stdio()).await?;

    service.waiting().await?;

    tracing::info!("rmcp-search server stopped");
    Ok(())
}
