//! Current-conditions weather tool backed by OpenWeatherMap.

use crate::identity::IdentityContext;
use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Default OpenWeatherMap API root.
pub const DEFAULT_WEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Fetches current weather for a city.
///
/// Runs without an ambient identity - weather is not user-scoped. Every
/// failure mode maps to a sentinel string the orchestrator can relay.
pub struct WeatherTool {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
}

impl WeatherTool {
    /// Create the tool; `api_key` of `None` leaves it in a degraded state
    /// that reports itself unconfigured.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: DEFAULT_WEATHER_API_BASE.to_string(),
        }
    }

    /// Point the tool at a different API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a city. Use only when the user asks \
         about the weather or the answer depends on it."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, optionally with country code"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value, _identity: &IdentityContext) -> Result<String> {
        let city = args["city"].as_str().unwrap_or_default();

        let Some(api_key) = &self.api_key else {
            tracing::warn!("get_weather called without an API key configured");
            return Ok("The weather service is not configured.".to_string());
        };

        let url = format!("{}/weather", self.api_base);
        let response = match self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(city, error = %e, "weather request failed");
                return Ok(format!(
                    "I could not reach the weather service for {}.",
                    city
                ));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(format!("I could not find a city named '{}'.", city));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::error!("weather service rejected the configured API key");
            return Ok("The weather service rejected the configured credentials.".to_string());
        }
        if !status.is_success() {
            tracing::error!(city, status = %status, "weather service error");
            return Ok(format!(
                "The weather service returned an error ({}) for {}.",
                status.as_u16(),
                city
            ));
        }

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(city, error = %e, "failed to parse weather response");
                return Ok("The weather service returned an unreadable response.".to_string());
            }
        };

        let description = data["weather"][0]["description"].as_str().unwrap_or("n/a");
        let temp = data["main"]["temp"].as_f64().unwrap_or(f64::NAN);
        let feels_like = data["main"]["feels_like"].as_f64().unwrap_or(f64::NAN);
        let temp_min = data["main"]["temp_min"].as_f64().unwrap_or(f64::NAN);
        let temp_max = data["main"]["temp_max"].as_f64().unwrap_or(f64::NAN);
        let humidity = data["main"]["humidity"].as_f64().unwrap_or(f64::NAN);
        let wind_speed = data["wind"]["speed"].as_f64().unwrap_or(f64::NAN);
        let city_name = data["name"].as_str().unwrap_or(city);

        Ok(format!(
            "Weather in {}: {}. Currently {:.1}C (feels like {:.1}C). \
             Today's range: {:.1}C to {:.1}C. Humidity: {:.0}%. Wind: {:.1} m/s.",
            city_name, description, temp, feels_like, temp_min, temp_max, humidity, wind_speed
        ))
    }
}
