//! Agriculture alert composition over current weather and a short forecast

use chrono::Utc;

use crate::models::{
    AgricultureAlert, AlertSummary, AlertType, CropType, RiskLevel, WeatherDataSource,
    WeatherReading,
};
use crate::weather_risk::analyze_weather_risk;

/// Forecast entries scanned for warnings (three days at 8 readings per day)
pub const FORECAST_WINDOW: usize = 24;

/// Compose alerts for a crop from the current reading and an optional forecast
///
/// A current-weather alert is emitted when the current assessment is above
/// low. At most one forecast warning is emitted, when any entry inside the
/// window assesses as high.
pub fn compose_agriculture_alerts(
    current: &WeatherReading,
    forecast: &[WeatherReading],
    crop_type: CropType,
    data_source: WeatherDataSource,
) -> AlertSummary {
    let mut alerts = Vec::new();

    let assessment = analyze_weather_risk(current);
    if assessment.overall_risk != RiskLevel::Low {
        let risk_names: Vec<&str> = assessment
            .risks
            .iter()
            .map(|r| r.risk_type.as_str())
            .collect();
        alerts.push(AgricultureAlert {
            alert_type: AlertType::CurrentWeather,
            severity: assessment.overall_risk,
            title: "Current weather risk".to_string(),
            message: format!(
                "Current conditions pose a {} risk to {} ({})",
                assessment.overall_risk.as_str(),
                crop_type,
                risk_names.join(", ")
            ),
            assessment: Some(assessment),
        });
    }

    let upcoming_high = forecast
        .iter()
        .take(FORECAST_WINDOW)
        .any(|reading| analyze_weather_risk(reading).overall_risk == RiskLevel::High);

    if upcoming_high {
        alerts.push(AgricultureAlert {
            alert_type: AlertType::ForecastWarning,
            severity: RiskLevel::Medium,
            title: "Upcoming weather risk".to_string(),
            message: format!(
                "High-risk weather is forecast for {} within the next three days",
                crop_type
            ),
            assessment: None,
        });
    }

    AlertSummary {
        crop_type,
        alert_count: alerts.len(),
        alerts,
        data_source,
        generated_at: Utc::now(),
    }
}
