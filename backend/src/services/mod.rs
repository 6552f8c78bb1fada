//! Business logic services for the crop disease diagnosis server

pub mod knowledge_base;
pub mod prediction;
pub mod weather;

pub use knowledge_base::{KnowledgeBase, PgDiseaseStore};
pub use prediction::{PredictionInput, PredictionService};
pub use weather::{LocationRisk, WeatherService};
