//! Rule-based disease scoring
//!
//! Each candidate starts from its base (prior prevalence) confidence and
//! accumulates weather and seasonal bonuses. Rules are evaluated
//! independently and may overlap; the upper clamp bounds the total.

use crate::catalog::{base_confidence, fallback_prediction, static_candidates};
use crate::models::{CropType, DiseaseRecord, ScoredCandidate, Severity, WeatherReading};

/// Lower bound for any scored confidence
pub const MIN_CONFIDENCE: f64 = 0.10;
/// Upper bound for any rule-based confidence
pub const MAX_CONFIDENCE: f64 = 0.95;

const HUMID_BONUS: f64 = 0.15;
const WARM_BONUS: f64 = 0.10;
const COOL_WET_BONUS: f64 = 0.20;
const HOT_SEASON_BONUS: f64 = 0.10;
const MILD_SEASON_BONUS: f64 = 0.10;

/// Score contributions for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub weather: f64,
    pub seasonal: f64,
}

impl ScoreBreakdown {
    /// Clamped total rounded to two decimals
    pub fn confidence(&self) -> f64 {
        let total = (self.base + self.weather + self.seasonal).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        (total * 100.0).round() / 100.0
    }

    /// Non-zero contributions in base, weather, season order
    pub fn factors(&self) -> Vec<String> {
        let mut factors = Vec::with_capacity(3);
        if self.base != 0.0 {
            factors.push(format!("Base: {:.0}%", self.base * 100.0));
        }
        if self.weather != 0.0 {
            factors.push(format!("Weather: +{:.0}%", self.weather * 100.0));
        }
        if self.seasonal != 0.0 {
            factors.push(format!("Season: +{:.0}%", self.seasonal * 100.0));
        }
        factors
    }
}

/// Weather bonus for a disease under the given reading
pub fn weather_contribution(disease: &DiseaseRecord, weather: &WeatherReading) -> f64 {
    let temp = weather.temperature_celsius;
    let humidity = weather.humidity_percent;
    let mut bonus = 0.0;

    if humidity > 70.0
        && (disease.has_cause(&["fungal", "humid", "moisture"]) || disease.name_contains(&["blight"]))
    {
        bonus += HUMID_BONUS;
    }

    if temp > 25.0 && temp < 35.0 && (disease.has_cause(&["warm"]) || disease.name_contains(&["blast"]))
    {
        bonus += WARM_BONUS;
    }

    if temp < 20.0
        && humidity > 80.0
        && (disease.name_contains(&["late blight"]) || disease.has_cause(&["cool"]))
    {
        bonus += COOL_WET_BONUS;
    }

    bonus
}

/// Seasonal bonus for a disease under the given reading
pub fn seasonal_contribution(disease: &DiseaseRecord, weather: &WeatherReading) -> f64 {
    let temp = weather.temperature_celsius;
    let humidity = weather.humidity_percent;
    let mut bonus = 0.0;

    if temp > 30.0 && disease.name_contains(&["bacterial", "wilt"]) {
        bonus += HOT_SEASON_BONUS;
    }

    if temp > 20.0
        && temp < 30.0
        && humidity > 60.0
        && disease.name_contains(&["blight", "spot", "blast"])
    {
        bonus += MILD_SEASON_BONUS;
    }

    bonus
}

/// Compute the score breakdown for one candidate
pub fn breakdown(
    crop_type: CropType,
    disease: &DiseaseRecord,
    weather: Option<&WeatherReading>,
) -> ScoreBreakdown {
    let base = base_confidence(crop_type, &disease.name);
    match weather {
        Some(w) => ScoreBreakdown {
            base,
            weather: weather_contribution(disease, w),
            seasonal: seasonal_contribution(disease, w),
        },
        None => ScoreBreakdown {
            base,
            ..Default::default()
        },
    }
}

/// Score and rank candidates, descending by confidence
///
/// Ties keep the input order. An empty candidate list yields the single
/// static fallback guess for the crop type.
pub fn score_candidates(
    crop_type: CropType,
    candidates: &[DiseaseRecord],
    weather: Option<&WeatherReading>,
) -> Vec<ScoredCandidate> {
    if candidates.is_empty() {
        return vec![synthetic_candidate(crop_type)];
    }

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|disease| {
            let parts = breakdown(crop_type, disease, weather);
            ScoredCandidate {
                disease_name: disease.name.clone(),
                confidence: parts.confidence(),
                contributing_factors: parts.factors(),
                severity: disease.severity,
                symptoms: disease.symptoms.clone(),
                treatments: disease.treatments.clone(),
            }
        })
        .collect();

    // sort_by is stable, so ties preserve knowledge-base order
    scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    scored
}

/// Score against the built-in catalog only
pub fn score_static(crop_type: CropType, weather: Option<&WeatherReading>) -> Vec<ScoredCandidate> {
    score_candidates(crop_type, &static_candidates(crop_type), weather)
}

fn synthetic_candidate(crop_type: CropType) -> ScoredCandidate {
    let (name, confidence) = fallback_prediction(crop_type);
    ScoredCandidate {
        disease_name: name.to_string(),
        confidence,
        contributing_factors: vec![format!("Base: {:.0}%", confidence * 100.0)],
        severity: Severity::Medium,
        symptoms: Vec::new(),
        treatments: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disease(name: &str, causes: &[&str]) -> DiseaseRecord {
        DiseaseRecord {
            name: name.to_string(),
            crop_type: CropType::Tomato,
            causes: causes.iter().map(|c| c.to_string()).collect(),
            symptoms: vec![],
            treatments: vec![],
            severity: Severity::Medium,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_weather_uses_base_only() {
        let d = disease("Late Blight", &["fungal", "cool"]);
        let parts = breakdown(CropType::Tomato, &d, None);
        assert!(approx(parts.base, 0.55));
        assert_eq!(parts.weather, 0.0);
        assert_eq!(parts.seasonal, 0.0);
        assert_eq!(parts.factors(), vec!["Base: 55%".to_string()]);
    }

    #[test]
    fn test_cool_wet_late_blight() {
        let d = disease("Late Blight", &["fungal", "cool", "humid", "moisture"]);
        let weather = WeatherReading::new(18.0, 90.0).with_condition("Rain");
        let parts = breakdown(CropType::Tomato, &d, Some(&weather));

        // humid rule (+0.15) and cool/wet rule (+0.20)
        assert!(approx(parts.weather, 0.35));
        assert_eq!(parts.seasonal, 0.0);
        assert!(approx(parts.confidence(), 0.90));
        assert_eq!(
            parts.factors(),
            vec!["Base: 55%".to_string(), "Weather: +35%".to_string()]
        );
    }

    #[test]
    fn test_warm_rule_uses_open_interval() {
        let d = disease("Rice Blast", &[]);
        assert_eq!(weather_contribution(&d, &WeatherReading::new(25.0, 50.0)), 0.0);
        assert!(approx(weather_contribution(&d, &WeatherReading::new(26.0, 50.0)), 0.10));
        assert_eq!(weather_contribution(&d, &WeatherReading::new(35.0, 50.0)), 0.0);
    }

    #[test]
    fn test_blight_name_triggers_humid_bonus_without_causes() {
        let d = disease("Sheath Blight", &[]);
        assert!(approx(weather_contribution(&d, &WeatherReading::new(22.0, 75.0)), 0.15));
    }

    #[test]
    fn test_blight_double_counts_weather_and_season() {
        let d = disease("Early Blight", &["fungal", "warm"]);
        let weather = WeatherReading::new(27.0, 75.0);
        // humid +0.15, warm +0.10
        assert!(approx(weather_contribution(&d, &weather), 0.25));
        // mild season +0.10
        assert!(approx(seasonal_contribution(&d, &weather), 0.10));
    }

    #[test]
    fn test_hot_season_bacterial_and_wilt() {
        let hot = WeatherReading::new(32.0, 40.0);
        assert!(approx(seasonal_contribution(&disease("Bacterial Spot", &[]), &hot), 0.10));
        assert!(approx(seasonal_contribution(&disease("Fusarium Wilt", &[]), &hot), 0.10));
        assert_eq!(seasonal_contribution(&disease("Leaf Mold", &[]), &hot), 0.0);
    }

    #[test]
    fn test_confidence_clamped() {
        let high = ScoreBreakdown { base: 0.9, weather: 0.45, seasonal: 0.1 };
        assert_eq!(high.confidence(), MAX_CONFIDENCE);

        let low = ScoreBreakdown { base: 0.0, weather: 0.0, seasonal: 0.0 };
        assert_eq!(low.confidence(), MIN_CONFIDENCE);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![
            disease("Alpha Rot", &[]),
            disease("Beta Rot", &[]),
            disease("Gamma Rot", &[]),
        ];
        let scored = score_candidates(CropType::Other, &candidates, None);
        let names: Vec<_> = scored.iter().map(|c| c.disease_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Rot", "Beta Rot", "Gamma Rot"]);
    }

    #[test]
    fn test_empty_candidates_yield_synthetic_fallback() {
        let scored = score_candidates(CropType::Other, &[], None);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].disease_name, "General Plant Disease");
        assert_eq!(scored[0].confidence, 0.3);

        let scored = score_candidates(CropType::Rice, &[], None);
        assert_eq!(scored[0].disease_name, "Rice Blast");
    }

    #[test]
    fn test_static_tomato_ranking_in_cool_rain() {
        let weather = WeatherReading::new(18.0, 90.0).with_condition("Rain");
        let scored = score_static(CropType::Tomato, Some(&weather));
        assert_eq!(scored[0].disease_name, "Late Blight");
        assert!(scored[0].confidence >= 0.75);
        assert!(scored[0].confidence <= MAX_CONFIDENCE);
        assert!(scored[0]
            .contributing_factors
            .iter()
            .any(|f| f.starts_with("Weather: +")));
    }
}
