//! Weather risk and alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CropType, WeatherDataSource};

/// Named agricultural weather hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskType {
    HighHumidity,
    HeatStress,
    ColdStress,
    WetConditions,
    DroughtStress,
    Optimal,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::HighHumidity => "high-humidity",
            RiskType::HeatStress => "heat-stress",
            RiskType::ColdStress => "cold-stress",
            RiskType::WetConditions => "wet-conditions",
            RiskType::DroughtStress => "drought-stress",
            RiskType::Optimal => "optimal",
        }
    }
}

/// Risk severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// A single fired risk rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRisk {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub level: RiskLevel,
    pub message: String,
    pub conditions: String,
}

/// Categorized risks for one weather reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    pub risks: Vec<WeatherRisk>,
    /// Deduplicated, first-seen order
    pub recommendations: Vec<String>,
}

/// Kind of agriculture alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertType {
    CurrentWeather,
    ForecastWarning,
}

/// User-facing weather notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgricultureAlert {
    pub alert_type: AlertType,
    pub severity: RiskLevel,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
}

/// Alerts composed for a location and crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub crop_type: CropType,
    pub alerts: Vec<AgricultureAlert>,
    pub alert_count: usize,
    pub data_source: WeatherDataSource,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_type_serialization() {
        assert_eq!(
            serde_json::to_string(&RiskType::HighHumidity).unwrap(),
            "\"high-humidity\""
        );
        assert_eq!(
            serde_json::to_string(&AlertType::ForecastWarning).unwrap(),
            "\"forecast-warning\""
        );
    }

    #[test]
    fn test_weather_risk_type_field_name() {
        let risk = WeatherRisk {
            risk_type: RiskType::Optimal,
            level: RiskLevel::Low,
            message: "ok".to_string(),
            conditions: "fine".to_string(),
        };
        let value = serde_json::to_value(&risk).unwrap();
        assert_eq!(value["type"], "optimal");
        assert_eq!(value["level"], "low");
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }
}
