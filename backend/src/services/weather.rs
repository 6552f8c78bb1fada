//! Weather risk service
//!
//! Fetches readings for a location and runs them through the risk analyzer.
//! Weather provider failures degrade to the conservative default reading
//! and never reach the caller.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    analyze_weather_risk, compose_agriculture_alerts, AlertSummary, CropType, GpsCoordinates,
    RiskAssessment, WeatherDataSource, WeatherReading,
};

use crate::external::WeatherSource;

/// Risk assessment for a fetched reading
#[derive(Debug, Clone, Serialize)]
pub struct LocationRisk {
    pub weather: WeatherReading,
    pub data_source: WeatherDataSource,
    pub assessment: RiskAssessment,
}

/// Weather service for risk analysis
#[derive(Clone)]
pub struct WeatherService {
    source: Option<Arc<dyn WeatherSource>>,
}

impl WeatherService {
    /// `source` is `None` when no weather API key is configured
    pub fn new(source: Option<Arc<dyn WeatherSource>>) -> Self {
        Self { source }
    }

    /// Analyze a supplied reading
    pub fn analyze(&self, reading: &WeatherReading) -> RiskAssessment {
        analyze_weather_risk(reading)
    }

    /// Current reading for a location, or the conservative default
    pub async fn current_or_fallback(
        &self,
        coords: GpsCoordinates,
    ) -> (WeatherReading, WeatherDataSource) {
        let Some(source) = &self.source else {
            tracing::debug!("Weather source not configured, using default reading");
            return (WeatherReading::conservative_default(), WeatherDataSource::Fallback);
        };

        match source.current(coords).await {
            Ok(reading) => (reading, WeatherDataSource::Live),
            Err(e) => {
                tracing::warn!(location = %coords, "Current weather unavailable, using default: {}", e);
                (WeatherReading::conservative_default(), WeatherDataSource::Fallback)
            }
        }
    }

    /// Forecast for a location, or an empty list
    pub async fn forecast_or_empty(&self, coords: GpsCoordinates) -> Vec<WeatherReading> {
        let Some(source) = &self.source else {
            return Vec::new();
        };

        match source.forecast(coords).await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!(location = %coords, "Forecast unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch current weather for a location and assess it
    pub async fn assess_location(&self, coords: GpsCoordinates) -> LocationRisk {
        let (weather, data_source) = self.current_or_fallback(coords).await;
        let assessment = analyze_weather_risk(&weather);

        LocationRisk {
            weather,
            data_source,
            assessment,
        }
    }

    /// Agriculture alerts for a crop at a location
    pub async fn agriculture_alerts(
        &self,
        coords: GpsCoordinates,
        crop_type: CropType,
    ) -> AlertSummary {
        let (current, data_source) = self.current_or_fallback(coords).await;
        let forecast = self.forecast_or_empty(coords).await;

        let summary = compose_agriculture_alerts(&current, &forecast, crop_type, data_source);
        tracing::info!(
            location = %coords,
            crop_type = %crop_type,
            alert_count = summary.alert_count,
            "Composed agriculture alerts"
        );
        summary
    }
}
