use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler, wrapper::Parameters},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const STUB_SALARY: u32 = 43_000;
pub const STUB_JOB: &str = "Software Engineer";

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct NameParams {
    #[schemars(description = "The name of the employee")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub salary: u32,
    pub job: String,
}

/// Every employee is a software engineer on the same salary, for now.
pub fn employee_info(name: &str) -> EmployeeInfo {
    EmployeeInfo {
        name: name.to_string(),
        salary: STUB_SALARY,
        job: STUB_JOB.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeServer {
    pub tool_router: ToolRouter<Self>,
}

impl Default for EmployeeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

#[rmcp::tool_router]
impl EmployeeServer {
    #[rmcp::tool(description = "Get information about a given employee")]
    pub async fn get_employee_info(
        &self,
        Parameters(params): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(name = %params.name, "employee lookup");
        let info = employee_info(&params.name);

        Ok(CallToolResult::success(vec![Content::json(&info)?]))
    }
}

#[rmcp::tool_handler]
impl ServerHandler for EmployeeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Employee directory lookup".into()),
        }
    }
}
