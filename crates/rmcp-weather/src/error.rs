use rmcp::ErrorData as McpError;
use serde_json::json;
use thiserror::Error;

/// Every way a current-weather lookup can fail.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("missing credential: {0} is not set")]
    Configuration(&'static str),

    #[error("weather provider unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid API key")]
    Authentication,

    #[error("weather provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl WeatherError {
    /// Stable machine-readable name, sent to MCP clients as `data.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Configuration(_) => "configuration",
            WeatherError::Network(_) => "network",
            WeatherError::InvalidRequest(_) => "invalid_request",
            WeatherError::Authentication => "authentication",
            WeatherError::Provider { .. } => "provider",
            WeatherError::InvalidResponse(_) => "invalid_response",
        }
    }
}

// The request URL carries the API key, so it never leaves the adapter
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(err.without_url())
    }
}

impl From<WeatherError> for McpError {
    fn from(err: WeatherError) -> Self {
        let message = err.to_string();
        match &err {
            WeatherError::InvalidRequest(_) => {
                McpError::invalid_params(message, Some(json!({ "kind": err.kind() })))
            }
            WeatherError::Provider { status, .. } => McpError::internal_error(
                message,
                Some(json!({ "kind": err.kind(), "status": status })),
            ),
            _ => McpError::internal_error(message, Some(json!({ "kind": err.kind() }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn invalid_request_maps_to_invalid_params() {
        let err: McpError = WeatherError::InvalidRequest("bad city".into()).into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "invalid request: bad city");
        assert_eq!(err.data, Some(json!({ "kind": "invalid_request" })));
    }

    #[test]
    fn provider_error_carries_status() {
        let err: McpError = WeatherError::Provider {
            status: 503,
            message: "down".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.data, Some(json!({ "kind": "provider", "status": 503 })));
    }

    #[test]
    fn authentication_message_ignores_body() {
        assert_eq!(WeatherError::Authentication.to_string(), "invalid API key");
        assert_eq!(WeatherError::Authentication.kind(), "authentication");
    }
}
