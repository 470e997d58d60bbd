use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{WeatherConfig, API_KEY_VAR};
use crate::error::WeatherError;

const KPH_PER_MPS: f64 = 3.6;
const MISSING_CONDITION: &str = "N/A";
const GENERIC_INVALID_REQUEST: &str = "invalid request";

/// Normalized current-weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub condition: String,
    /// Meters per second.
    pub wind_speed: f64,
}

/// Client for the weatherapi.com "current conditions" endpoint.
#[derive(Debug, Clone)]
pub struct WeatherAdapter {
    config: WeatherConfig,
    http: Client,
}

impl WeatherAdapter {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch current conditions for `city`. One request per call, no retries.
    pub async fn current(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("{} is not set, refusing weather lookup", API_KEY_VAR);
            return Err(WeatherError::Configuration(API_KEY_VAR));
        };

        let url = format!("{}/current.json", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(city, %url, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", api_key),
                ("q", city),
                ("aqi", "no"),
                ("lang", self.config.lang.as_str()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(WeatherError::from)
            .inspect_err(|e| tracing::warn!(city, error = %e, "weather request failed"))?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::from)?;

        if !status.is_success() {
            let err = classify_failure(status, &body);
            tracing::warn!(city, %status, error = %err, "weather provider rejected request");
            return Err(err);
        }

        parse_current(&body).inspect_err(|e| {
            tracing::warn!(city, error = %e, "weather provider sent an unusable response")
        })
    }
}

fn classify_failure(status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::BAD_REQUEST => WeatherError::InvalidRequest(
            error_message(body).unwrap_or_else(|| GENERIC_INVALID_REQUEST.to_string()),
        ),
        StatusCode::UNAUTHORIZED => WeatherError::Authentication,
        _ => WeatherError::Provider {
            status: status.as_u16(),
            message: error_message(body).unwrap_or_else(|| body.to_string()),
        },
    }
}

/// Pulls `error.message` out of a provider error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

/// Turn a successful current.json body into a [`WeatherRecord`].
///
/// Missing `current` or `current.condition` sections are treated as empty.
/// Temperature and humidity are required; wind and condition have fallbacks.
pub fn parse_current(body: &str) -> Result<WeatherRecord, WeatherError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| WeatherError::InvalidResponse(format!("body is not JSON: {e}")))?;

    let current = value.get("current");
    let field = |name: &str| current.and_then(|c| c.get(name));

    let temperature = parse_optional_float(field("temp_c"), None);
    let humidity = parse_optional_float(field("humidity"), None);
    let wind_kph = parse_optional_float(field("wind_kph"), Some(0.0)).unwrap_or_default();

    let (Some(temperature), Some(humidity)) = (temperature, humidity) else {
        return Err(WeatherError::InvalidResponse("missing required fields".to_string()));
    };

    let condition = field("condition")
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .unwrap_or(MISSING_CONDITION)
        .to_string();

    Ok(WeatherRecord {
        temperature,
        humidity,
        condition,
        wind_speed: wind_kph / KPH_PER_MPS,
    })
}

/// Read a JSON number or numeric string, falling back to `default`.
///
/// `None` is the "unparseable" sentinel, so passing `default = None` makes a
/// field effectively required.
pub fn parse_optional_float(raw: Option<&Value>, default: Option<f64>) -> Option<f64> {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).or(default)
}
