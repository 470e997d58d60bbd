use std::{collections::HashMap, env, path::Path};

use rmcp_search::SearchConfig;
use rmcp_weather::WeatherConfig;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 23000;
pub const DEFAULT_PATH: &str = "/mcp";
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("invalid .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Everything the process needs, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub weather: WeatherConfig,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Process environment first, then the entries of `dotenv_path`.
    /// A missing file is the same as an empty one.
    pub fn load(dotenv_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = read_dotenv(dotenv_path.as_ref())?;
        Self::from_lookup(|name| env::var(name).ok().or_else(|| file.get(name).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("MCP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "MCP_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("MCP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            path: normalize_path(get("MCP_PATH").as_deref().unwrap_or(DEFAULT_PATH)),
            weather: WeatherConfig::from_lookup(&lookup),
            search: SearchConfig::from_lookup(&lookup),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    match dotenvy::from_path_iter(path) {
        Ok(entries) => Ok(entries.collect::<Result<_, _>>()?),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
