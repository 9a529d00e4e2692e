//! Weather proxy: current conditions from an OpenWeatherMap-style API
//!
//! Provider failures are returned as an `{"error": ...}` payload rather than
//! an HTTP error, so the dashboard can render them inline.

pub mod client;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::Path;
use std::sync::Arc;

use crate::store::JsonFileStore;
pub use client::{ReqwestTransport, TransportResponse, WeatherTransport};

pub const DEFAULT_CITY: &str = "Lyon";
pub const DEFAULT_LANG: &str = "fr";

/// Weather settings from `config.json`, under `weather` or at the top level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSettings {
    pub api_key: String,
    pub city: String,
    pub lang: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            city: DEFAULT_CITY.to_string(),
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl WeatherSettings {
    pub fn from_config(config: &Map<String, Value>) -> Self {
        let section = config
            .get("weather")
            .and_then(Value::as_object)
            .unwrap_or(config);
        let text = |key: &str| section.get(key).and_then(Value::as_str).map(str::to_string);

        let defaults = Self::default();
        Self {
            api_key: text("openweathermap_api_key").unwrap_or(defaults.api_key),
            city: text("city")
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.city),
            lang: text("lang")
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(defaults.lang),
        }
    }

    /// Read settings from the config document; defaults when it is absent or unreadable
    pub fn load(config_path: &Path) -> Self {
        let store: JsonFileStore<Map<String, Value>> = JsonFileStore::new(config_path);
        match store.load_optional() {
            Ok(Some(config)) => Self::from_config(&config),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("[WEATHER] Could not read weather settings: {}", e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: Number,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WeatherError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherReport {
    Current(CurrentWeather),
    Error(WeatherError),
}

// Provider response subset

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    name: String,
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    feels_like: f64,
    humidity: Number,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    description: String,
    icon: String,
}

pub struct WeatherService {
    base_url: String,
    transport: Arc<dyn WeatherTransport>,
}

impl WeatherService {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn WeatherTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Fetch current conditions. Never fails: every problem becomes a
    /// `WeatherReport::Error`. No request is made without an API key.
    pub async fn current_weather(&self, settings: &WeatherSettings) -> WeatherReport {
        if settings.api_key.trim().is_empty() {
            return WeatherReport::Error(WeatherError {
                error: "API key not configured".to_string(),
                message: Some(
                    "Add your OpenWeatherMap API key to data/config.json".to_string(),
                ),
            });
        }

        let query = [
            ("q", settings.city.as_str()),
            ("appid", settings.api_key.as_str()),
            ("units", "metric"),
            ("lang", settings.lang.as_str()),
        ];

        let resp = match self.transport.get(&self.base_url, &query).await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("[WEATHER] Request failed: {}", e);
                return WeatherReport::Error(WeatherError::new(format!("Network error: {}", e)));
            }
        };

        match resp.status {
            200 => match normalize(&resp.body) {
                Ok(current) => WeatherReport::Current(current),
                Err(e) => {
                    log::warn!("[WEATHER] Unexpected provider payload: {}", e);
                    WeatherReport::Error(WeatherError::new(format!(
                        "Network error: invalid response ({})",
                        e
                    )))
                }
            },
            401 => WeatherReport::Error(WeatherError::new("Invalid API key")),
            status => WeatherReport::Error(WeatherError::new(format!("Error {}", status))),
        }
    }
}

fn normalize(body: &str) -> Result<CurrentWeather, String> {
    let data: ProviderResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| "missing weather conditions".to_string())?;

    Ok(CurrentWeather {
        city: data.name,
        temperature: round1(data.main.temp),
        feels_like: round1(data.main.feels_like),
        description: capitalize(&condition.description),
        humidity: data.main.humidity,
        icon: condition.icon,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// First character upper-cased, the rest lower-cased
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
