//! Crop type model

use serde::{Deserialize, Serialize};

/// Crop category under analysis
///
/// Parsing is total: unrecognized names collapse to [`CropType::Other`], which
/// shares the generic disease catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CropType {
    Rice,
    Wheat,
    Corn,
    Tomato,
    Potato,
    Cotton,
    Sugarcane,
    Soybean,
    Other,
}

impl CropType {
    /// All enumerated crop types
    pub const ALL: [CropType; 9] = [
        CropType::Rice,
        CropType::Wheat,
        CropType::Corn,
        CropType::Tomato,
        CropType::Potato,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Soybean,
        CropType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
            CropType::Corn => "corn",
            CropType::Tomato => "tomato",
            CropType::Potato => "potato",
            CropType::Cotton => "cotton",
            CropType::Sugarcane => "sugarcane",
            CropType::Soybean => "soybean",
            CropType::Other => "other",
        }
    }

    /// Parse a crop name case-insensitively
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rice" => CropType::Rice,
            "wheat" => CropType::Wheat,
            "corn" | "maize" => CropType::Corn,
            "tomato" => CropType::Tomato,
            "potato" => CropType::Potato,
            "cotton" => CropType::Cotton,
            "sugarcane" => CropType::Sugarcane,
            "soybean" | "soy" => CropType::Soybean,
            _ => CropType::Other,
        }
    }
}

impl From<String> for CropType {
    fn from(name: String) -> Self {
        CropType::from_name(&name)
    }
}

impl From<&str> for CropType {
    fn from(name: &str) -> Self {
        CropType::from_name(name)
    }
}

impl From<CropType> for String {
    fn from(crop: CropType) -> Self {
        crop.as_str().to_string()
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
