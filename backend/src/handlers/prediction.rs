//! HTTP handlers for disease prediction

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::{validate_crop_name, CropType, PredictionResult, WeatherReading};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::PredictionInput;
use crate::AppState;

/// Prediction request body
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    pub crop_type: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate]
    pub weather_data: Option<WeatherReading>,
    pub environmental_data: Option<serde_json::Value>,
}

impl PredictRequest {
    fn into_input(self) -> AppResult<PredictionInput> {
        self.validate()?;
        validate_crop_name(&self.crop_type).map_err(|msg| AppError::validation("crop_type", msg))?;

        let mut input = PredictionInput::new(CropType::from_name(&self.crop_type));
        input.image_url = self.image_url;
        input.weather = self.weather_data;
        input.environmental_data = self.environmental_data;
        Ok(input)
    }
}

/// Diagnose a crop disease
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> AppResult<Json<PredictionResult>> {
    let input = request.into_input()?;
    let result = state.predictions.predict(input).await;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> PredictRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_minimal_request_accepted() {
        let input = request(serde_json::json!({"crop_type": "Tomato"}))
            .into_input()
            .unwrap();
        assert_eq!(input.crop_type, CropType::Tomato);
        assert!(input.weather.is_none());
    }

    #[test]
    fn test_unknown_crop_accepted_as_other() {
        let input = request(serde_json::json!({"crop_type": "unknown_crop"}))
            .into_input()
            .unwrap();
        assert_eq!(input.crop_type, CropType::Other);
    }

    #[test]
    fn test_blank_crop_rejected() {
        let err = request(serde_json::json!({"crop_type": "  "}))
            .into_input()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "crop_type"));
    }

    #[test]
    fn test_out_of_range_humidity_rejected() {
        let result = request(serde_json::json!({
            "crop_type": "rice",
            "weather_data": {"temperature_celsius": 25.0, "humidity_percent": 140.0}
        }))
        .into_input();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let result = request(serde_json::json!({
            "crop_type": "rice",
            "image_url": "not a url"
        }))
        .into_input();
        assert!(result.is_err());
    }
}
