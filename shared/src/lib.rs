//! Shared types and decision engine for the crop disease diagnosis platform
//!
//! This crate holds the pure, deterministic parts of the system: domain
//! models, the built-in disease catalog, rule-based scoring, weather risk
//! analysis and alert composition. It is used by the backend server and by
//! the WASM bindings for offline use.

pub mod alerts;
pub mod catalog;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;
pub mod weather_risk;

pub use alerts::*;
pub use catalog::{
    base_confidence, fallback_prediction, static_candidates, GENERAL_PLANT_DISEASE,
};
pub use models::*;
pub use scoring::{score_candidates, score_static, MAX_CONFIDENCE, MIN_CONFIDENCE};
pub use types::*;
pub use validation::*;
pub use weather_risk::*;
