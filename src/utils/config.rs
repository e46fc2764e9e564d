//! Environment-driven configuration.
//!
//! All settings come from the process environment (with `.env` support via
//! `dotenvy`). Missing optional settings degrade features - memory runs
//! unconfigured, the weather tool reports itself unavailable - they never
//! abort startup.

use crate::llm::openai::DEFAULT_API_BASE;
use serde::Deserialize;
use std::env;

/// Default chat model for the completion collaborator.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
/// Default multimodal model for image analysis.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Completion/vision endpoint settings.
    pub completion: CompletionConfig,
    /// Memory backend settings.
    pub memory: MemoryConfig,
    /// Weather tool settings.
    pub weather: WeatherConfig,
}

/// Settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// API key; absent means the assistant cannot run completions.
    pub api_key: Option<String>,
    /// Endpoint root, defaults to the public OpenAI API.
    pub api_base: String,
    /// Chat model identifier.
    pub model: String,
    /// Multimodal model identifier for vision handoffs.
    pub vision_model: String,
}

/// Settings for the long-term memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Backend selector ("local" for the embedded store); absent disables
    /// memory.
    pub backend: Option<String>,
    /// Collection name entries are stored under.
    pub collection: String,
}

/// Settings for the weather tool.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; absent leaves the tool degraded.
    pub api_key: Option<String>,
    /// Optional API root override (used by tests).
    pub api_base: Option<String>,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            completion: CompletionConfig {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                model: env::var("NIMBUS_CHAT_MODEL")
                    .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
                vision_model: env::var("NIMBUS_VISION_MODEL")
                    .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string()),
            },
            memory: MemoryConfig {
                backend: env::var("NIMBUS_MEMORY_BACKEND")
                    .ok()
                    .filter(|b| !b.is_empty()),
                collection: env::var("NIMBUS_MEMORY_COLLECTION")
                    .unwrap_or_else(|_| "memories".to_string()),
            },
            weather: WeatherConfig {
                api_key: env::var("OPENWEATHERMAP_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty()),
                api_base: env::var("NIMBUS_WEATHER_API_BASE").ok(),
            },
        }
    }

    /// Whether long-term memory can run.
    ///
    /// Requires both a backend selector and model credentials: the memory
    /// pipeline embeds entries with the completion endpoint's models.
    pub fn is_memory_configured(&self) -> bool {
        self.memory.backend.is_some() && self.completion.api_key.is_some()
    }
}
