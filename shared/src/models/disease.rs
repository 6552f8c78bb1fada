//! Disease knowledge models

use serde::{Deserialize, Serialize};

use super::CropType;

/// Disease severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Parse a stored severity; unknown values are treated as medium
    pub fn from_db(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "low" => Severity::Low,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Medium,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disease knowledge entry for one crop type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub crop_type: CropType,
    /// Free-text descriptors such as "fungal", "cool", "humid"
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub severity: Severity,
}

impl DiseaseRecord {
    /// Whether any cause tag contains one of the given keywords (case-insensitive)
    pub fn has_cause(&self, keywords: &[&str]) -> bool {
        self.causes.iter().any(|cause| {
            let cause = cause.to_lowercase();
            keywords.iter().any(|k| cause.contains(k))
        })
    }

    /// Whether the disease name contains one of the given keywords (case-insensitive)
    pub fn name_contains(&self, keywords: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        keywords.iter().any(|k| name.contains(k))
    }
}

/// A disease scored against the current inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub disease_name: String,
    /// Always within [0.10, 0.95]
    pub confidence: f64,
    /// Human-readable score contributions: base, then weather, then season
    pub contributing_factors: Vec<String>,
    pub severity: Severity,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
}
