//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A weather reading at a point in time
///
/// Produced by the weather collaborator (live or fallback) and treated as an
/// immutable snapshot by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherReading {
    #[validate(range(min = -60.0, max = 60.0))]
    pub temperature_celsius: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub wind_speed_mps: Option<f64>,
    /// Main condition text, e.g. "Clear", "Rain"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Probability of precipitation (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub precipitation_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl WeatherReading {
    pub fn new(temperature_celsius: f64, humidity_percent: f64) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
            wind_speed_mps: None,
            condition: None,
            precipitation_probability: None,
            recorded_at: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_wind_speed(mut self, wind_speed_mps: f64) -> Self {
        self.wind_speed_mps = Some(wind_speed_mps);
        self
    }

    pub fn with_precipitation_probability(mut self, pop: f64) -> Self {
        self.precipitation_probability = Some(pop);
        self
    }

    /// Conservative reading used when live weather cannot be fetched
    pub fn conservative_default() -> Self {
        Self::new(25.0, 60.0).with_condition("Clear")
    }

    /// Whether the condition text contains "Rain" (case-sensitive)
    pub fn is_raining(&self) -> bool {
        self.condition
            .as_deref()
            .map(|c| c.contains("Rain"))
            .unwrap_or(false)
    }
}

/// Where the weather inputs of a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherDataSource {
    Live,
    Fallback,
}
