//! Disease prediction result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ScoredCandidate, Severity};

/// Maximum number of alternatives carried by a prediction
pub const MAX_ALTERNATIVES: usize = 3;

/// Strategy that produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    ExternalModel,
    EnhancedRuleBased,
    Fallback,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMethod::ExternalModel => "external_model",
            PredictionMethod::EnhancedRuleBased => "enhanced_rule_based",
            PredictionMethod::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lower-ranked diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativePrediction {
    pub disease_name: String,
    pub confidence: f64,
}

/// Diagnosis returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: Uuid,
    pub disease_name: String,
    pub confidence: f64,
    /// At most three, descending, none above `confidence`
    pub alternative_predictions: Vec<AlternativePrediction>,
    pub method: PredictionMethod,
    /// Confidence-banded advice for display
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub treatments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributing_factors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl PredictionResult {
    fn base(disease_name: String, confidence: f64, method: PredictionMethod) -> Self {
        Self {
            id: Uuid::new_v4(),
            recommendation: expert_recommendation(confidence).to_string(),
            disease_name,
            confidence,
            alternative_predictions: Vec::new(),
            method,
            severity: None,
            symptoms: Vec::new(),
            treatments: Vec::new(),
            contributing_factors: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    /// Shape a ranked candidate list: the head becomes the primary, the next
    /// three become alternatives. Returns `None` for an empty list.
    pub fn from_scored(candidates: Vec<ScoredCandidate>) -> Option<Self> {
        let mut ranked = candidates.into_iter();
        let primary = ranked.next()?;

        let alternatives = ranked
            .take(MAX_ALTERNATIVES)
            .map(|c| AlternativePrediction {
                disease_name: c.disease_name,
                confidence: c.confidence,
            })
            .collect();

        let mut result = Self::base(
            primary.disease_name,
            primary.confidence,
            PredictionMethod::EnhancedRuleBased,
        );
        result.alternative_predictions = alternatives;
        result.severity = Some(primary.severity);
        result.symptoms = primary.symptoms;
        result.treatments = primary.treatments;
        result.contributing_factors = primary.contributing_factors;
        Some(result)
    }

    /// Build a result from an external model diagnosis, normalizing the
    /// alternatives to the result invariants.
    pub fn from_external(
        disease_name: String,
        confidence: f64,
        alternatives: Vec<AlternativePrediction>,
    ) -> Self {
        let mut alternatives: Vec<AlternativePrediction> = alternatives
            .into_iter()
            .filter(|a| a.confidence.is_finite() && a.confidence <= confidence)
            .collect();
        alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        alternatives.truncate(MAX_ALTERNATIVES);

        let mut result = Self::base(disease_name, confidence, PredictionMethod::ExternalModel);
        result.alternative_predictions = alternatives;
        result
    }

    /// Single static guess with no alternatives
    pub fn fallback(disease_name: &str, confidence: f64) -> Self {
        Self::base(disease_name.to_string(), confidence, PredictionMethod::Fallback)
    }
}

/// Advice text for a confidence value
pub fn expert_recommendation(confidence: f64) -> &'static str {
    if confidence < 0.4 {
        "strongly recommend expert"
    } else if confidence < 0.6 {
        "consider consulting an expert"
    } else if confidence < 0.8 {
        "monitor closely, preventive measures"
    } else {
        "follow treatment guidelines"
    }
}
