//! Route definitions for the crop disease diagnosis server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predictions", post(handlers::create_prediction))
        .route("/diseases", get(handlers::list_diseases))
        .nest("/weather", weather_routes())
}

/// Weather risk routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/risk",
            get(handlers::get_location_risk).post(handlers::analyze_weather_risk),
        )
        .route("/alerts", get(handlers::get_agriculture_alerts))
}
