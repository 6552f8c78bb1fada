//! Disease Model Client
//!
//! Client for the remote image-based disease prediction service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{AlternativePrediction, CropType, WeatherReading};

use crate::config::AiModelConfig;
use crate::error::{AppError, AppResult};

/// A remote model that maps an image and context to a diagnosis
#[async_trait]
pub trait DiseaseModel: Send + Sync {
    async fn predict(&self, request: &ModelPredictionRequest) -> AppResult<ModelPrediction>;
}

/// Request body sent to `{endpoint}/predict`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPredictionRequest {
    pub image_url: Option<String>,
    pub crop_type: CropType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<WeatherReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_data: Option<serde_json::Value>,
}

/// Response body from the prediction service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPredictionResponse {
    pub disease_name: String,
    pub confidence: f64,
    #[serde(default)]
    pub alternative_predictions: Vec<ModelAlternative>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAlternative {
    pub disease_name: String,
    pub confidence: f64,
}

/// A validated model diagnosis
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    pub disease_name: String,
    pub confidence: f64,
    pub alternatives: Vec<AlternativePrediction>,
}

impl TryFrom<ModelPredictionResponse> for ModelPrediction {
    type Error = AppError;

    fn try_from(r: ModelPredictionResponse) -> Result<Self, Self::Error> {
        let disease_name = r.disease_name.trim().to_string();
        if disease_name.is_empty() {
            return Err(AppError::AiModelError("Response has no disease name".into()));
        }
        if !(0.0..=1.0).contains(&r.confidence) {
            return Err(AppError::AiModelError(format!(
                "Confidence {} is outside [0, 1]",
                r.confidence
            )));
        }

        let alternatives = r
            .alternative_predictions
            .into_iter()
            .filter(|a| !a.disease_name.trim().is_empty() && (0.0..=1.0).contains(&a.confidence))
            .map(|a| AlternativePrediction {
                disease_name: a.disease_name,
                confidence: a.confidence,
            })
            .collect();

        Ok(ModelPrediction {
            disease_name,
            confidence: r.confidence,
            alternatives,
        })
    }
}

/// HTTP client for the disease prediction service
#[derive(Clone)]
pub struct AiDiseaseModelClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

impl AiDiseaseModelClient {
    /// Create a new disease model client
    pub fn new(api_endpoint: String, api_key: String, timeout_secs: u64) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    /// Create a client from configuration, or `None` when no real endpoint is set
    pub fn from_config(config: &AiModelConfig) -> AppResult<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.timeout_secs,
        )
        .map(Some)
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.api_endpoint)
    }
}

#[async_trait]
impl DiseaseModel for AiDiseaseModelClient {
    async fn predict(&self, request: &ModelPredictionRequest) -> AppResult<ModelPrediction> {
        let mut builder = self
            .http_client
            .post(self.predict_url())
            .header("Content-Type", "application/json")
            .json(request);
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::AiModelError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AiModelError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: ModelPredictionResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiModelError(format!("Failed to parse response: {}", e)))?;

        result.try_into()
    }
}
