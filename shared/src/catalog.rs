//! Built-in disease knowledge
//!
//! Declarative tables keyed by crop type:
//! - the static disease catalog used when the knowledge store has no entries
//! - base confidence (prior prevalence) per crop and disease
//! - single-disease fallback guesses

use crate::models::{CropType, DiseaseRecord, Severity};

/// Name of the generic entry used for crops without a dedicated catalog
pub const GENERAL_PLANT_DISEASE: &str = "General Plant Disease";

/// Base confidence for a crop/disease pair missing from [`BASE_CONFIDENCE`]
pub const DEFAULT_BASE_CONFIDENCE: f64 = 0.35;

/// Fallback guess for crops missing from [`FALLBACK_PREDICTIONS`]
pub const DEFAULT_FALLBACK: (&str, f64) = (GENERAL_PLANT_DISEASE, 0.3);

/// Compile-time catalog entry
#[derive(Debug, Clone, Copy)]
pub struct StaticDisease {
    pub name: &'static str,
    pub causes: &'static [&'static str],
    pub symptoms: &'static [&'static str],
    pub treatments: &'static [&'static str],
    pub severity: Severity,
}

impl StaticDisease {
    pub fn to_record(&self, crop_type: CropType) -> DiseaseRecord {
        DiseaseRecord {
            name: self.name.to_string(),
            crop_type,
            causes: self.causes.iter().map(|s| s.to_string()).collect(),
            symptoms: self.symptoms.iter().map(|s| s.to_string()).collect(),
            treatments: self.treatments.iter().map(|s| s.to_string()).collect(),
            severity: self.severity,
        }
    }
}

const TOMATO_DISEASES: &[StaticDisease] = &[
    StaticDisease {
        name: "Early Blight",
        causes: &["fungal", "warm", "humid"],
        symptoms: &[
            "Dark concentric rings on older leaves",
            "Yellowing around leaf spots",
            "Stem lesions near the soil line",
        ],
        treatments: &[
            "Remove affected lower leaves",
            "Apply chlorothalonil or copper fungicide",
            "Rotate crops and mulch to prevent soil splash",
        ],
        severity: Severity::Medium,
    },
    StaticDisease {
        name: "Late Blight",
        causes: &["fungal", "cool", "humid", "moisture"],
        symptoms: &[
            "Water-soaked gray-green patches on leaves",
            "White fungal growth on leaf undersides",
            "Brown greasy lesions on fruit",
        ],
        treatments: &[
            "Destroy infected plants immediately",
            "Apply mancozeb or copper-based fungicide",
            "Avoid overhead irrigation",
        ],
        severity: Severity::High,
    },
    StaticDisease {
        name: "Bacterial Spot",
        causes: &["bacterial", "warm", "wet"],
        symptoms: &[
            "Small dark water-soaked spots on leaves",
            "Raised scabby spots on fruit",
        ],
        treatments: &[
            "Use certified disease-free seed",
            "Apply copper sprays preventively",
            "Avoid working with wet plants",
        ],
        severity: Severity::Medium,
    },
    StaticDisease {
        name: "Fusarium Wilt",
        causes: &["fungal", "soil-borne", "warm"],
        symptoms: &[
            "Yellowing of lower leaves on one side",
            "Wilting during the heat of the day",
            "Brown vascular tissue in the stem",
        ],
        treatments: &[
            "Plant resistant varieties",
            "Remove and destroy infected plants",
            "Practice long crop rotation",
        ],
        severity: Severity::High,
    },
];

const RICE_DISEASES: &[StaticDisease] = &[
    StaticDisease {
        name: "Rice Blast",
        causes: &["fungal", "humid", "nitrogen excess"],
        symptoms: &[
            "Diamond-shaped lesions with gray centers",
            "Neck rot causing panicles to break",
        ],
        treatments: &[
            "Apply tricyclazole fungicide",
            "Avoid excessive nitrogen fertilizer",
            "Plant resistant varieties",
        ],
        severity: Severity::High,
    },
    StaticDisease {
        name: "Bacterial Leaf Blight",
        causes: &["bacterial", "warm", "flooding"],
        symptoms: &[
            "Yellow to white lesions along leaf margins",
            "Wilting of seedlings (kresek)",
        ],
        treatments: &[
            "Use balanced fertilization",
            "Drain fields periodically",
            "Plant resistant varieties",
        ],
        severity: Severity::High,
    },
    StaticDisease {
        name: "Brown Spot",
        causes: &["fungal", "nutrient deficiency"],
        symptoms: &[
            "Oval brown spots with gray centers on leaves",
            "Discolored grains",
        ],
        treatments: &[
            "Correct soil potassium and silicon deficiency",
            "Treat seed with fungicide",
        ],
        severity: Severity::Medium,
    },
    StaticDisease {
        name: "Sheath Blight",
        causes: &["fungal", "warm", "humid", "dense planting"],
        symptoms: &[
            "Oval greenish-gray lesions on leaf sheaths",
            "Lesions merging into irregular bands",
        ],
        treatments: &[
            "Reduce plant density",
            "Apply validamycin or hexaconazole",
            "Avoid excess nitrogen",
        ],
        severity: Severity::Medium,
    },
];

const GENERIC_DISEASES: &[StaticDisease] = &[StaticDisease {
    name: GENERAL_PLANT_DISEASE,
    causes: &["environmental stress", "unknown pathogen"],
    symptoms: &[
        "Discoloration of leaves",
        "Reduced vigor",
        "Abnormal growth",
    ],
    treatments: &[
        "Consult a local agricultural expert",
        "Remove visibly affected plant parts",
        "Maintain balanced watering and nutrition",
    ],
    severity: Severity::Medium,
}];

/// Prior prevalence per (crop, disease)
pub const BASE_CONFIDENCE: &[(CropType, &str, f64)] = &[
    (CropType::Tomato, "Early Blight", 0.60),
    (CropType::Tomato, "Late Blight", 0.55),
    (CropType::Tomato, "Bacterial Spot", 0.45),
    (CropType::Tomato, "Fusarium Wilt", 0.40),
    (CropType::Rice, "Rice Blast", 0.60),
    (CropType::Rice, "Bacterial Leaf Blight", 0.50),
    (CropType::Rice, "Brown Spot", 0.45),
    (CropType::Rice, "Sheath Blight", 0.40),
    (CropType::Wheat, "Leaf Rust", 0.50),
    (CropType::Potato, "Late Blight", 0.55),
    (CropType::Corn, "Northern Leaf Blight", 0.45),
];

/// Single-disease guesses used when scoring produced nothing
pub const FALLBACK_PREDICTIONS: &[(CropType, &str, f64)] = &[
    (CropType::Tomato, "Early Blight", 0.4),
    (CropType::Rice, "Rice Blast", 0.4),
    (CropType::Wheat, "Leaf Rust", 0.35),
    (CropType::Corn, "Northern Leaf Blight", 0.35),
    (CropType::Potato, "Late Blight", 0.35),
];

/// Static catalog entries for a crop type; never empty
pub fn static_catalog(crop_type: CropType) -> &'static [StaticDisease] {
    match crop_type {
        CropType::Tomato => TOMATO_DISEASES,
        CropType::Rice => RICE_DISEASES,
        _ => GENERIC_DISEASES,
    }
}

/// Static catalog converted to disease records
pub fn static_candidates(crop_type: CropType) -> Vec<DiseaseRecord> {
    static_catalog(crop_type)
        .iter()
        .map(|d| d.to_record(crop_type))
        .collect()
}

/// Base confidence for a disease; name comparison is case-insensitive
pub fn base_confidence(crop_type: CropType, disease_name: &str) -> f64 {
    BASE_CONFIDENCE
        .iter()
        .find(|(crop, name, _)| *crop == crop_type && name.eq_ignore_ascii_case(disease_name))
        .map(|(_, _, confidence)| *confidence)
        .unwrap_or(DEFAULT_BASE_CONFIDENCE)
}

/// Static single-disease guess for a crop type
pub fn fallback_prediction(crop_type: CropType) -> (&'static str, f64) {
    FALLBACK_PREDICTIONS
        .iter()
        .find(|(crop, _, _)| *crop == crop_type)
        .map(|(_, name, confidence)| (*name, *confidence))
        .unwrap_or(DEFAULT_FALLBACK)
}
