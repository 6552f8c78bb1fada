//! Configuration management for the crop disease diagnosis server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// External disease model configuration
    pub ai_model: AiModelConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiModelConfig {
    /// Base URL of the prediction service; `/predict` is appended
    #[serde(default)]
    pub endpoint: String,

    /// Sent as `x-api-key` when non-empty
    #[serde(default)]
    pub api_key: String,

    /// Upper bound on a single prediction call
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    #[serde(default)]
    pub api_key: String,

    /// Attempts per request before giving up
    pub max_retries: u32,

    /// First retry delay, doubled on each attempt
    pub base_delay_ms: u64,
}

/// Markers of an endpoint left at its template value
const PLACEHOLDER_MARKERS: &[&str] = &["your-", "your_", "placeholder", "changeme"];

/// Whether a configured value is empty or a template placeholder
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}

impl AiModelConfig {
    /// The external model is only consulted with a real endpoint
    pub fn is_configured(&self) -> bool {
        !is_placeholder(&self.endpoint)
    }
}

impl WeatherConfig {
    pub fn is_configured(&self) -> bool {
        !is_placeholder(&self.api_key)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("ai_model.endpoint", "")?
            .set_default("ai_model.api_key", "")?
            .set_default("ai_model.timeout_secs", 30)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.max_retries", 3)?
            .set_default("weather.base_delay_ms", 1000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGD_ prefix)
            .add_source(
                Environment::with_prefix("AGD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AiModelConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}
