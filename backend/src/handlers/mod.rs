//! HTTP handlers

pub mod disease;
pub mod health;
pub mod prediction;
pub mod weather;

pub use disease::list_diseases;
pub use health::health_check;
pub use prediction::create_prediction;
pub use weather::{analyze_weather_risk, get_agriculture_alerts, get_location_risk};
