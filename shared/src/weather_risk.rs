//! Weather risk analysis
//!
//! Maps a single weather reading to categorized agricultural risks and
//! canned recommendations. All rules are checked against the same reading
//! and several may fire.

use crate::models::{RiskAssessment, RiskLevel, RiskType, WeatherReading, WeatherRisk};

/// Fixed advice per risk type
pub fn recommendations_for(risk_type: RiskType) -> &'static [&'static str] {
    match risk_type {
        RiskType::HighHumidity => &[
            "Ensure good air circulation around plants",
            "Avoid overhead watering",
            "Apply preventive fungicide if necessary",
        ],
        RiskType::HeatStress => &[
            "Provide shade during hottest parts of the day",
            "Increase watering frequency",
            "Monitor for increased pest activity",
        ],
        RiskType::ColdStress => &[
            "Protect plants from frost",
            "Reduce watering frequency",
            "Consider using row covers",
        ],
        RiskType::WetConditions => &[
            "Improve drainage around plants",
            "Remove infected plant material promptly",
            "Apply preventive copper-based fungicides",
        ],
        RiskType::DroughtStress => &[
            "Increase irrigation frequency",
            "Apply mulch to conserve soil moisture",
            "Monitor for spider mites and aphids",
        ],
        RiskType::Optimal => &["Continue regular monitoring and care"],
    }
}

/// Overall level from the number of fired risks
pub fn overall_risk(fired: usize) -> RiskLevel {
    match fired {
        0 => RiskLevel::Low,
        1 | 2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Analyze a weather reading; total and pure
pub fn analyze_weather_risk(weather: &WeatherReading) -> RiskAssessment {
    let temp = weather.temperature_celsius;
    let humidity = weather.humidity_percent;
    let condition = weather.condition.as_deref().unwrap_or("Unknown");
    let mut risks = Vec::new();

    if humidity > 80.0 {
        risks.push(WeatherRisk {
            risk_type: RiskType::HighHumidity,
            level: RiskLevel::High,
            message: "High humidity increases risk of fungal diseases".to_string(),
            conditions: format!("Humidity: {:.0}%", humidity),
        });
    }

    if temp > 35.0 {
        risks.push(WeatherRisk {
            risk_type: RiskType::HeatStress,
            level: RiskLevel::Medium,
            message: "High temperature may cause heat stress in crops".to_string(),
            conditions: format!("Temperature: {:.1}°C", temp),
        });
    } else if temp < 10.0 {
        risks.push(WeatherRisk {
            risk_type: RiskType::ColdStress,
            level: RiskLevel::Medium,
            message: "Low temperature may cause cold damage to crops".to_string(),
            conditions: format!("Temperature: {:.1}°C", temp),
        });
    }

    if weather.is_raining() && humidity > 70.0 {
        risks.push(WeatherRisk {
            risk_type: RiskType::WetConditions,
            level: RiskLevel::High,
            message: "Wet conditions favor the spread of plant diseases".to_string(),
            conditions: format!("Condition: {}, Humidity: {:.0}%", condition, humidity),
        });
    }

    if humidity < 30.0 && !weather.is_raining() {
        risks.push(WeatherRisk {
            risk_type: RiskType::DroughtStress,
            level: RiskLevel::Medium,
            message: "Low humidity may cause drought stress".to_string(),
            conditions: format!("Humidity: {:.0}%", humidity),
        });
    }

    let overall = overall_risk(risks.len());

    if risks.is_empty() {
        risks.push(WeatherRisk {
            risk_type: RiskType::Optimal,
            level: RiskLevel::Low,
            message: "Weather conditions are favorable for crop growth".to_string(),
            conditions: format!(
                "Temperature: {:.1}°C, Humidity: {:.0}%, Condition: {}",
                temp, humidity, condition
            ),
        });
    }

    let mut recommendations: Vec<String> = Vec::new();
    for risk in &risks {
        for advice in recommendations_for(risk.risk_type) {
            if !recommendations.iter().any(|r| r == advice) {
                recommendations.push(advice.to_string());
            }
        }
    }

    RiskAssessment {
        overall_risk: overall,
        risks,
        recommendations,
    }
}
