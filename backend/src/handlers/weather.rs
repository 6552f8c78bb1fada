//! HTTP handlers for weather risk endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    validate_coordinates, validate_crop_name, validate_weather_reading, AlertSummary, CropType,
    GpsCoordinates, RiskAssessment, WeatherReading,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::LocationRisk;
use crate::AppState;

/// Query parameters for location-based endpoints
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl LocationQuery {
    fn coordinates(&self) -> AppResult<GpsCoordinates> {
        let coords = GpsCoordinates::new(self.latitude, self.longitude);
        validate_coordinates(&coords).map_err(|msg| AppError::validation("location", msg))?;
        Ok(coords)
    }
}

/// Query parameters for agriculture alerts
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub crop_type: String,
}

/// Analyze a supplied weather reading
pub async fn analyze_weather_risk(
    State(state): State<AppState>,
    Json(reading): Json<WeatherReading>,
) -> AppResult<Json<RiskAssessment>> {
    reading.validate()?;
    validate_weather_reading(&reading).map_err(|msg| AppError::ValidationError(msg.to_string()))?;

    Ok(Json(state.weather.analyze(&reading)))
}

/// Fetch current weather for a location and analyze it
pub async fn get_location_risk(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<LocationRisk>> {
    let coords = query.coordinates()?;
    Ok(Json(state.weather.assess_location(coords).await))
}

/// Agriculture alerts for a crop at a location
pub async fn get_agriculture_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<AlertSummary>> {
    validate_crop_name(&query.crop_type).map_err(|msg| AppError::validation("crop_type", msg))?;
    let coords = LocationQuery {
        latitude: query.latitude,
        longitude: query.longitude,
    }
    .coordinates()?;

    let crop_type = CropType::from_name(&query.crop_type);
    Ok(Json(state.weather.agriculture_alerts(coords, crop_type).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_location_query_validates_range() {
        let ok = LocationQuery {
            latitude: Decimal::from_str("13.7563").unwrap(),
            longitude: Decimal::from_str("100.5018").unwrap(),
        };
        assert!(ok.coordinates().is_ok());

        let bad = LocationQuery {
            latitude: Decimal::from(95),
            longitude: Decimal::from(0),
        };
        assert!(matches!(
            bad.coordinates(),
            Err(AppError::Validation { ref field, .. }) if field == "location"
        ));
    }
}
