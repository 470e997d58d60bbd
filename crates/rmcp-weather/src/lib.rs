use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler, wrapper::Parameters},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod adapter;
pub mod config;
pub mod error;

pub use adapter::{parse_current, parse_optional_float, WeatherAdapter, WeatherRecord};
pub use config::WeatherConfig;
pub use error::WeatherError;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CityParams {
    #[schemars(description = "City to get current weather for, e.g. 'Paris'")]
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct WeatherServer {
    pub tool_router: ToolRouter<Self>,
    adapter: WeatherAdapter,
}

impl WeatherServer {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            adapter: WeatherAdapter::new(config),
        }
    }

    pub fn from_env() -> Self {
        Self::new(WeatherConfig::from_env())
    }
}

#[rmcp::tool_router]
impl WeatherServer {
    #[rmcp::tool(description = "Get current weather for a city: temperature (°C), humidity (%), condition and wind speed (m/s)")]
    pub async fn get_weather(
        &self,
        Parameters(params): Parameters<CityParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = self.adapter.current(&params.city).await?;

        Ok(CallToolResult::success(vec![Content::json(&record)?]))
    }
}

#[rmcp::tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Current weather conditions server using weatherapi.com".into()),
        }
    }
}
