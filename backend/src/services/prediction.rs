//! Disease prediction orchestration
//!
//! Strategies are tried in order and the first one that produces a result
//! wins: the external model, the rule-based scorer, then the static
//! per-crop guess.

use std::{sync::Arc, time::Duration};

use shared::{
    fallback_prediction, score_candidates, CropType, PredictionResult, WeatherReading,
};

use crate::external::{DiseaseModel, ModelPredictionRequest};
use crate::services::knowledge_base::KnowledgeBase;

/// Inputs for a single diagnosis
#[derive(Debug, Clone)]
pub struct PredictionInput {
    pub crop_type: CropType,
    pub image_url: Option<String>,
    pub weather: Option<WeatherReading>,
    pub environmental_data: Option<serde_json::Value>,
}

impl PredictionInput {
    pub fn new(crop_type: CropType) -> Self {
        Self {
            crop_type,
            image_url: None,
            weather: None,
            environmental_data: None,
        }
    }
}

/// Prediction orchestrator
#[derive(Clone)]
pub struct PredictionService {
    knowledge_base: KnowledgeBase,
    model: Option<Arc<dyn DiseaseModel>>,
    model_timeout: Duration,
}

impl PredictionService {
    /// `model` is `None` when no external endpoint is configured
    pub fn new(
        knowledge_base: KnowledgeBase,
        model: Option<Arc<dyn DiseaseModel>>,
        model_timeout: Duration,
    ) -> Self {
        Self {
            knowledge_base,
            model,
            model_timeout,
        }
    }

    /// Produce a diagnosis; never fails
    pub async fn predict(&self, input: PredictionInput) -> PredictionResult {
        if let Some(result) = self.try_external_model(&input).await {
            return result;
        }

        if let Some(result) = self.try_rule_based(&input).await {
            return result;
        }

        static_fallback(input.crop_type)
    }

    async fn try_external_model(&self, input: &PredictionInput) -> Option<PredictionResult> {
        let model = self.model.as_ref()?;

        let request = ModelPredictionRequest {
            image_url: input.image_url.clone(),
            crop_type: input.crop_type,
            weather_data: input.weather.clone(),
            environmental_data: input.environmental_data.clone(),
        };

        match tokio::time::timeout(self.model_timeout, model.predict(&request)).await {
            Ok(Ok(prediction)) => {
                tracing::info!(
                    crop_type = %input.crop_type,
                    disease = %prediction.disease_name,
                    confidence = prediction.confidence,
                    "External model prediction"
                );
                Some(PredictionResult::from_external(
                    prediction.disease_name,
                    prediction.confidence,
                    prediction.alternatives,
                ))
            }
            Ok(Err(e)) => {
                tracing::warn!(crop_type = %input.crop_type, "External model failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    crop_type = %input.crop_type,
                    timeout_ms = self.model_timeout.as_millis() as u64,
                    "External model timed out"
                );
                None
            }
        }
    }

    async fn try_rule_based(&self, input: &PredictionInput) -> Option<PredictionResult> {
        let candidates = self.knowledge_base.candidates(input.crop_type).await;
        let scored = score_candidates(input.crop_type, &candidates, input.weather.as_ref());
        let result = PredictionResult::from_scored(scored)?;

        tracing::debug!(
            crop_type = %input.crop_type,
            disease = %result.disease_name,
            confidence = result.confidence,
            candidates = candidates.len(),
            "Rule-based prediction"
        );
        Some(result)
    }
}

fn static_fallback(crop_type: CropType) -> PredictionResult {
    let (name, confidence) = fallback_prediction(crop_type);
    tracing::warn!(crop_type = %crop_type, "Using static fallback prediction");
    PredictionResult::fallback(name, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::external::ai_model::ModelPrediction;
    use crate::services::knowledge_base::tests::{record, FailingStore, MemoryStore};
    use async_trait::async_trait;
    use shared::{static_candidates, AlternativePrediction, PredictionMethod};

    struct FixedModel(ModelPrediction);

    #[async_trait]
    impl DiseaseModel for FixedModel {
        async fn predict(&self, _request: &ModelPredictionRequest) -> AppResult<ModelPrediction> {
            Ok(self.0.clone())
        }
    }

    struct SlowModel;

    #[async_trait]
    impl DiseaseModel for SlowModel {
        async fn predict(&self, _request: &ModelPredictionRequest) -> AppResult<ModelPrediction> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Err(AppError::AiModelError("unreachable".into()))
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl DiseaseModel for BrokenModel {
        async fn predict(&self, _request: &ModelPredictionRequest) -> AppResult<ModelPrediction> {
            Err(AppError::AiModelError("API returned 500: boom".into()))
        }
    }

    fn service(model: Option<Arc<dyn DiseaseModel>>) -> PredictionService {
        PredictionService::new(
            KnowledgeBase::new(Arc::new(MemoryStore(Vec::new()))),
            model,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_external_model_wins_when_available() {
        let model = FixedModel(ModelPrediction {
            disease_name: "Early Blight".into(),
            confidence: 0.72,
            alternatives: vec![
                AlternativePrediction { disease_name: "A".into(), confidence: 0.2 },
                AlternativePrediction { disease_name: "B".into(), confidence: 0.9 },
                AlternativePrediction { disease_name: "C".into(), confidence: 0.5 },
                AlternativePrediction { disease_name: "D".into(), confidence: 0.3 },
                AlternativePrediction { disease_name: "E".into(), confidence: 0.1 },
            ],
        });
        let result = service(Some(Arc::new(model)))
            .predict(PredictionInput::new(CropType::Tomato))
            .await;

        assert_eq!(result.method, PredictionMethod::ExternalModel);
        assert_eq!(result.disease_name, "Early Blight");
        assert_eq!(result.recommendation, "monitor closely, preventive measures");

        let names: Vec<&str> = result
            .alternative_predictions
            .iter()
            .map(|a| a.disease_name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "D", "A"]);
    }

    #[tokio::test]
    async fn test_timeout_falls_through_to_rules() {
        let result = service(Some(Arc::new(SlowModel)))
            .predict(PredictionInput::new(CropType::Rice))
            .await;

        assert_eq!(result.method, PredictionMethod::EnhancedRuleBased);
        assert_eq!(result.disease_name, "Rice Blast");
    }

    #[tokio::test]
    async fn test_model_error_falls_through_to_rules() {
        let result = service(Some(Arc::new(BrokenModel)))
            .predict(PredictionInput::new(CropType::Tomato))
            .await;
        assert_eq!(result.method, PredictionMethod::EnhancedRuleBased);
    }

    #[tokio::test]
    async fn test_tomato_cool_rain_predicts_late_blight() {
        let weather = WeatherReading::new(18.0, 90.0).with_condition("Rain");
        let result = service(None)
            .predict(PredictionInput {
                weather: Some(weather),
                ..PredictionInput::new(CropType::Tomato)
            })
            .await;

        assert_eq!(result.method, PredictionMethod::EnhancedRuleBased);
        assert_eq!(result.disease_name, "Late Blight");
        assert!(result.confidence >= 0.75 && result.confidence <= 0.95);
        assert!(result.contributing_factors.iter().any(|f| f.starts_with("Weather:")));
        assert_eq!(result.recommendation, "follow treatment guidelines");
    }

    #[tokio::test]
    async fn test_unknown_crop_gets_general_disease() {
        let result = service(None)
            .predict(PredictionInput::new(CropType::from_name("unknown_crop")))
            .await;

        assert_eq!(result.disease_name, "General Plant Disease");
        assert_eq!(result.method, PredictionMethod::EnhancedRuleBased);
        assert!(result.confidence >= 0.1 && result.confidence <= 0.4);
        assert!(result.alternative_predictions.is_empty());
    }

    #[tokio::test]
    async fn test_alternatives_drawn_from_candidates() {
        let result = service(None)
            .predict(PredictionInput {
                weather: Some(WeatherReading::new(28.0, 75.0)),
                ..PredictionInput::new(CropType::Tomato)
            })
            .await;

        let candidates = static_candidates(CropType::Tomato);
        assert!(result.alternative_predictions.len() <= 3);
        for alt in &result.alternative_predictions {
            assert!(alt.confidence <= result.confidence);
            assert!(candidates.iter().any(|c| c.name == alt.disease_name));
        }
    }

    #[tokio::test]
    async fn test_stored_diseases_are_scored() {
        let kb = KnowledgeBase::new(Arc::new(MemoryStore(vec![
            record("Leaf Rust", CropType::Wheat, &["fungal"]),
            record("Stem Rust", CropType::Wheat, &["warm"]),
        ])));
        let service = PredictionService::new(kb, None, Duration::from_millis(50));

        let result = service.predict(PredictionInput::new(CropType::Wheat)).await;
        assert_eq!(result.disease_name, "Leaf Rust");
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.alternative_predictions.len(), 1);
        assert_eq!(result.alternative_predictions[0].disease_name, "Stem Rust");
    }

    #[tokio::test]
    async fn test_failing_store_still_predicts() {
        let service = PredictionService::new(
            KnowledgeBase::new(Arc::new(FailingStore)),
            None,
            Duration::from_millis(50),
        );
        let result = service.predict(PredictionInput::new(CropType::Rice)).await;
        assert_eq!(result.method, PredictionMethod::EnhancedRuleBased);
    }

    #[test]
    fn test_static_fallback_uses_crop_guess() {
        let result = static_fallback(CropType::Tomato);
        assert_eq!(result.method, PredictionMethod::Fallback);
        assert_eq!(result.disease_name, "Early Blight");
        assert_eq!(result.confidence, 0.4);

        let other = static_fallback(CropType::Sugarcane);
        assert_eq!(other.disease_name, "General Plant Disease");
        assert_eq!(other.confidence, 0.3);
    }
}
