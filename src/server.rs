use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::*,
    ErrorData as McpError,
};
use rmcp_employee::{EmployeeServer, NameParams};
use rmcp_search::{QueryParams, SearchServer};
use rmcp_weather::{CityParams, WeatherServer};

use crate::config::ServerConfig;

/// One MCP server exposing every tool, each delegating to its own crate.
#[derive(Debug, Clone)]
pub struct ToolsServer {
    pub tool_router: ToolRouter<Self>,
    employee: EmployeeServer,
    search: SearchServer,
    weather: WeatherServer,
}

impl ToolsServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            employee: EmployeeServer::new(),
            search: SearchServer::new(config.search.clone()),
            weather: WeatherServer::new(config.weather.clone()),
        }
    }
}

#[rmcp::tool_router]
impl ToolsServer {
    // ========================================================================
    // EMPLOYEE
    // ========================================================================

    #[rmcp::tool(description = "Get information about a given employee")]
    pub async fn get_employee_info(
        &self,
        params: Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.employee.get_employee_info(params).await
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    #[rmcp::tool(description = "Search the web for a given query and return a list of results")]
    pub async fn get_search_results(
        &self,
        params: Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        self.search.get_search_results(params).await
    }

    // ========================================================================
    // WEATHER
    // ========================================================================

    #[rmcp::tool(description = "Get current weather for a city: temperature (°C), humidity (%), condition and wind speed (m/s)")]
    pub async fn get_weather(
        &self,
        params: Parameters<CityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.weather.get_weather(params).await
    }
}

#[rmcp::tool_handler]
impl ServerHandler for ToolsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "mcp-tools - employee lookup, web search and current weather for AI agents."
                    .into(),
            ),
        }
    }
}
