//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap API for current conditions and forecasts.
//! Requests are retried with exponential backoff before an error is returned.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::{GpsCoordinates, WeatherReading};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// A provider of current and forecast readings for a location
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, coords: GpsCoordinates) -> AppResult<WeatherReading>;

    async fn forecast(&self, coords: GpsCoordinates) -> AppResult<Vec<WeatherReading>>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: Option<OWMWind>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: Option<OWMWind>,
    pop: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            max_retries: config.max_retries.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }

    /// Create a client from configuration, or `None` without a usable API key
    pub fn from_config(config: &WeatherConfig) -> Option<Self> {
        config.is_configured().then(|| Self::new(config))
    }

    /// GET a JSON document, retrying failed attempts
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        with_retries(self.max_retries, self.base_delay, || self.get_once(url)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))
    }

    fn url(&self, resource: &str, coords: GpsCoordinates) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=metric",
            self.base_url, resource, coords.latitude, coords.longitude, self.api_key
        )
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    /// Fetch current weather conditions by GPS coordinates
    async fn current(&self, coords: GpsCoordinates) -> AppResult<WeatherReading> {
        let data: OWMCurrentResponse = self.get_json(&self.url("weather", coords)).await?;
        Ok(convert_current_response(data))
    }

    /// Fetch the 3-hourly forecast by GPS coordinates
    async fn forecast(&self, coords: GpsCoordinates) -> AppResult<Vec<WeatherReading>> {
        let data: OWMForecastResponse = self.get_json(&self.url("forecast", coords)).await?;
        Ok(convert_forecast_response(data))
    }
}

/// Delay before the retry following `attempt` (zero-based)
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Run `op` up to `max_retries` times, sleeping with exponential backoff
/// between failed attempts; the last error is returned
async fn with_retries<T, F, Fut>(max_retries: u32, base_delay: Duration, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut last_error = AppError::WeatherServiceUnavailable;

    for attempt in 0..max_retries {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "Weather API attempt failed: {}",
                    e
                );
                last_error = e;
            }
        }

        if attempt + 1 < max_retries {
            tokio::time::sleep(backoff_delay(base_delay, attempt)).await;
        }
    }

    Err(last_error)
}

/// Convert OpenWeatherMap current response to a reading
fn convert_current_response(data: OWMCurrentResponse) -> WeatherReading {
    WeatherReading {
        temperature_celsius: data.main.temp,
        humidity_percent: data.main.humidity,
        wind_speed_mps: data.wind.map(|w| w.speed),
        condition: data.weather.into_iter().next().map(|w| w.main),
        precipitation_probability: None,
        recorded_at: DateTime::from_timestamp(data.dt, 0),
    }
}

/// Convert OpenWeatherMap forecast response to readings in time order
fn convert_forecast_response(data: OWMForecastResponse) -> Vec<WeatherReading> {
    data.list
        .into_iter()
        .map(|item| WeatherReading {
            temperature_celsius: item.main.temp,
            humidity_percent: item.main.humidity,
            wind_speed_mps: item.wind.map(|w| w.speed),
            condition: item.weather.into_iter().next().map(|w| w.main),
            precipitation_probability: item.pop,
            recorded_at: DateTime::from_timestamp(item.dt, 0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_convert_current_response() {
        let body = r#"{
            "coord": {"lat": 18.79, "lon": 98.98},
            "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 24.5, "feels_like": 25.0, "pressure": 1008, "humidity": 88},
            "wind": {"speed": 3.2, "deg": 200},
            "dt": 1700000000,
            "name": "Chiang Mai"
        }"#;
        let data: OWMCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = convert_current_response(data);

        assert_eq!(reading.temperature_celsius, 24.5);
        assert_eq!(reading.humidity_percent, 88.0);
        assert_eq!(reading.wind_speed_mps, Some(3.2));
        assert_eq!(reading.condition.as_deref(), Some("Rain"));
        assert!(reading.is_raining());
        assert!(reading.recorded_at.is_some());
    }

    #[test]
    fn test_convert_forecast_response() {
        let body = r#"{
            "city": {"name": "Chiang Mai"},
            "list": [
                {"dt": 1700000000, "main": {"temp": 30.0, "humidity": 40}, "weather": [{"main": "Clear"}], "pop": 0.0},
                {"dt": 1700010800, "main": {"temp": 21.0, "humidity": 92}, "weather": [], "pop": 0.8}
            ]
        }"#;
        let data: OWMForecastResponse = serde_json::from_str(body).unwrap();
        let readings = convert_forecast_response(data);

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].condition.as_deref(), Some("Clear"));
        assert_eq!(readings[1].condition, None);
        assert_eq!(readings[1].precipitation_probability, Some(0.8));
    }

    #[test]
    fn test_backoff_doubles() {
        let client = WeatherClient::new(&WeatherConfig {
            base_delay_ms: 1000,
            ..WeatherConfig::default()
        });
        assert_eq!(backoff_delay(client.base_delay, 0), Duration::from_millis(1000));
        assert_eq!(backoff_delay(client.base_delay, 1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(client.base_delay, 2), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_retries_use_every_attempt() {
        let mut attempts = 0;
        let result: AppResult<()> = with_retries(3, Duration::from_millis(1), || {
            attempts += 1;
            let n = attempts;
            async move { Err(AppError::ExternalService(format!("attempt {} failed", n))) }
        })
        .await;

        assert_eq!(attempts, 3);
        assert!(matches!(result, Err(AppError::ExternalService(ref msg)) if msg == "attempt 3 failed"));
    }

    #[tokio::test]
    async fn test_retries_stop_after_success() {
        let mut attempts = 0;
        let result = with_retries(3, Duration::from_millis(1), || {
            attempts += 1;
            let n = attempts;
            async move {
                if n < 2 {
                    Err(AppError::ExternalService("timeout".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_zero_retries_still_attempts_once() {
        let client = WeatherClient::new(&WeatherConfig {
            max_retries: 0,
            ..WeatherConfig::default()
        });
        assert_eq!(client.max_retries, 1);
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(WeatherClient::from_config(&WeatherConfig::default()).is_none());

        let config = WeatherConfig {
            api_key: "abc123".into(),
            ..WeatherConfig::default()
        };
        assert!(WeatherClient::from_config(&config).is_some());
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_after_retries() {
        let client = WeatherClient::new(&WeatherConfig {
            api_endpoint: "http://127.0.0.1:9".into(),
            api_key: "abc123".into(),
            max_retries: 2,
            base_delay_ms: 1,
        });
        let coords = GpsCoordinates::new(Decimal::from(18), Decimal::from(98));

        let result = client.current(coords).await;
        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
