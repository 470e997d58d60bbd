use axum::Router;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};

use crate::server::ToolsServer;

/// Mount the streamable HTTP endpoint for `server` at `path`.
pub fn router(server: ToolsServer, path: &str) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    // axum refuses to nest at the root
    if path == "/" {
        Router::new().fallback_service(service)
    } else {
        Router::new().nest_service(path, service)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use rmcp::{model::CallToolRequestParam, transport::StreamableHttpClientTransport, ServiceExt};
    use serde_json::{json, Value};
    use tokio::{net::TcpListener, sync::oneshot};

    use super::*;
    use crate::config::ServerConfig;

    async fn start_server(path: &str) -> (SocketAddr, oneshot::Sender<()>) {
        let config = ServerConfig::from_lookup(|_| None).expect("default config");
        let router = router(ToolsServer::new(&config), path);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read listener addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        (addr, shutdown_tx)
    }

    async fn lists_and_calls_tools(path: &str, uri_path: &str) {
        let (addr, shutdown) = start_server(path).await;
        let transport = StreamableHttpClientTransport::from_uri(format!("http://{addr}{uri_path}"));
        let client = ().serve(transport).await.unwrap();

        let mut names: Vec<String> = client
            .list_all_tools()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            ["get_employee_info", "get_search_results", "get_weather"]
        );

        let request: CallToolRequestParam = serde_json::from_value(json!({
            "name": "get_employee_info",
            "arguments": { "name": "Linus" },
        }))
        .unwrap();
        let response = client.call_tool(request).await.unwrap();
        assert_ne!(response.is_error, Some(true));

        let raw = response.content[0].raw.as_text().unwrap().text.clone();
        let value: Value = serde_json::from_str(&raw).expect("Invalid JSON response");
        assert_eq!(
            value,
            json!({ "name": "Linus", "salary": 43000, "job": "Software Engineer" })
        );

        let _ = client.cancel().await;
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn serves_tools_under_nested_path() {
        lists_and_calls_tools("/mcp", "/mcp").await;
    }

    #[tokio::test]
    async fn serves_tools_at_root_path() {
        lists_and_calls_tools("/", "/").await;
    }
}
