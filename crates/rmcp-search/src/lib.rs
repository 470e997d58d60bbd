use std::{env, time::Duration};

use reqwest::Client;
use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler, wrapper::Parameters},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const API_KEY_VAR: &str = "TAVILY_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
pub const NO_RESULTS: &str = "No results found";

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get(API_KEY_VAR),
            base_url: get("TAVILY_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("missing credential: {0} is not set")]
    Configuration(&'static str),

    #[error("search provider unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Thin pass-through to the Tavily search endpoint.
#[derive(Debug, Clone)]
pub struct SearchProxy {
    config: SearchConfig,
    http: Client,
}

impl SearchProxy {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Run `query` and hand back the provider's `results` array untouched.
    pub async fn search(&self, query: &str) -> Result<Vec<Value>, SearchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SearchError::Configuration(API_KEY_VAR))?;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(query, "forwarding web search");

        let res = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&json!({ "query": query }))
            .timeout(TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(SearchError::Provider {
                status: status.as_u16(),
                message: body,
            });
        }

        let mut value: Value = serde_json::from_str(&body)
            .map_err(|e| SearchError::InvalidResponse(format!("body is not JSON: {e}")))?;

        match value.get_mut("results").map(Value::take) {
            Some(Value::Array(results)) => Ok(results),
            _ => Err(SearchError::InvalidResponse("missing results array".to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    #[schemars(description = "The web search query")]
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct SearchServer {
    pub tool_router: ToolRouter<Self>,
    proxy: SearchProxy,
}

impl SearchServer {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            proxy: SearchProxy::new(config),
        }
    }

    pub fn from_env() -> Self {
        Self::new(SearchConfig::from_env())
    }
}

#[rmcp::tool_router]
impl SearchServer {
    #[rmcp::tool(description = "Search the web for a given query and return a list of results")]
    pub async fn get_search_results(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.proxy.search(&params.query).await {
            Ok(results) => Ok(CallToolResult::success(vec![Content::json(&results)?])),
            Err(e) => {
                // Failures stay visible to the agent as a flagged tool result
                tracing::warn!(query = %params.query, error = %e, "web search failed");
                Ok(CallToolResult::error(vec![Content::text(NO_RESULTS)]))
            }
        }
    }
}

#[rmcp::tool_handler]
impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Web search server backed by Tavily".into()),
        }
    }
}
