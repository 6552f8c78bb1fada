//! WebAssembly module for the Crop Disease Diagnosis Platform
//!
//! Provides client-side computation for offline use:
//! - Weather risk analysis
//! - Rule-based disease scoring over the built-in catalog
//! - Agriculture alert composition
//!
//! Inputs and outputs are JSON strings using the same field names as the
//! HTTP API.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{analyze_weather_risk as analyze, compose_agriculture_alerts, score_static};

fn parse_reading(json: &str) -> Result<WeatherReading, String> {
    let reading: WeatherReading =
        serde_json::from_str(json).map_err(|e| format!("Invalid weather JSON: {}", e))?;
    validate_weather_reading(&reading)?;
    Ok(reading)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn analyze_json(weather_json: &str) -> Result<String, String> {
    let reading = parse_reading(weather_json)?;
    to_json(&analyze(&reading))
}

fn score_json(crop_type: &str, weather_json: Option<String>) -> Result<String, String> {
    validate_crop_name(crop_type)?;
    let weather = match weather_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => Some(parse_reading(json)?),
        _ => None,
    };
    let crop = CropType::from_name(crop_type);
    to_json(&score_static(crop, weather.as_ref()))
}

fn alerts_json(current_json: &str, forecast_json: &str, crop_type: &str) -> Result<String, String> {
    validate_crop_name(crop_type)?;
    let current = parse_reading(current_json)?;
    let forecast: Vec<WeatherReading> = if forecast_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(forecast_json).map_err(|e| format!("Invalid forecast JSON: {}", e))?
    };

    let summary = compose_agriculture_alerts(
        &current,
        &forecast,
        CropType::from_name(crop_type),
        WeatherDataSource::Live,
    );
    to_json(&summary)
}

/// Analyze a weather reading; returns a risk assessment as JSON
#[wasm_bindgen]
pub fn analyze_weather_risk(weather_json: &str) -> Result<String, JsValue> {
    analyze_json(weather_json).map_err(|e| JsValue::from_str(&e))
}

/// Score the built-in candidates for a crop; returns ranked candidates as JSON
#[wasm_bindgen]
pub fn score_diseases(crop_type: &str, weather_json: Option<String>) -> Result<String, JsValue> {
    score_json(crop_type, weather_json).map_err(|e| JsValue::from_str(&e))
}

/// Advice text for a confidence value
#[wasm_bindgen]
pub fn expert_recommendation(confidence: f64) -> String {
    shared::expert_recommendation(confidence).to_string()
}

/// Compose alerts from a current reading and a JSON array of forecast readings
#[wasm_bindgen]
pub fn agriculture_alerts(
    current_json: &str,
    forecast_json: &str,
    crop_type: &str,
) -> Result<String, JsValue> {
    alerts_json(current_json, forecast_json, crop_type).map_err(|e| JsValue::from_str(&e))
}
