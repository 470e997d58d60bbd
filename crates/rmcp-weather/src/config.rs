use std::{env, time::Duration};

pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the weatherapi.com adapter, read once at startup.
///
/// A missing API key is not rejected here; lookups fail with
/// [`WeatherError::Configuration`](crate::WeatherError::Configuration) instead.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub lang: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WeatherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = get("WEATHER_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            api_key: get(API_KEY_VAR),
            base_url: get("WEATHER_API_BASE_URL").unwrap_or(defaults.base_url),
            lang: get("WEATHER_LANG").unwrap_or(defaults.lang),
            timeout,
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
