//! External API integrations

pub mod ai_model;
pub mod weather;

pub use ai_model::{AiDiseaseModelClient, DiseaseModel, ModelPredictionRequest};
pub use weather::{WeatherClient, WeatherSource};
