//! Crop Disease Diagnosis Platform - Backend Server
//!
//! Serves disease predictions and weather risk analysis for farmers and
//! agricultural experts.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{AiDiseaseModelClient, DiseaseModel, WeatherClient, WeatherSource};
use services::{KnowledgeBase, PgDiseaseStore, PredictionService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub knowledge_base: KnowledgeBase,
    pub predictions: PredictionService,
    pub weather: WeatherService,
}

impl AppState {
    /// Wire services from configuration
    fn build(db: sqlx::PgPool, config: Config) -> anyhow::Result<Self> {
        let knowledge_base = KnowledgeBase::new(Arc::new(PgDiseaseStore::new(db.clone())));

        let model: Option<Arc<dyn DiseaseModel>> =
            match AiDiseaseModelClient::from_config(&config.ai_model)? {
                Some(client) => {
                    tracing::info!("External disease model: {}", config.ai_model.endpoint);
                    Some(Arc::new(client))
                }
                None => {
                    tracing::info!("External disease model not configured, using rule-based scoring");
                    None
                }
            };
        let predictions = PredictionService::new(
            knowledge_base.clone(),
            model,
            Duration::from_secs(config.ai_model.timeout_secs),
        );

        let weather_source: Option<Arc<dyn WeatherSource>> = match WeatherClient::from_config(&config.weather) {
            Some(client) => Some(Arc::new(client)),
            None => {
                tracing::warn!("Weather API key not configured, alerts will use fallback readings");
                None
            }
        };
        let weather = WeatherService::new(weather_source);

        Ok(Self {
            db,
            config: Arc::new(config),
            knowledge_base,
            predictions,
            weather,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agd_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Disease Diagnosis Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::build(db_pool, config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Disease Diagnosis API v1.0"
}

/// Liveness probe
async fn health_check() -> &'static str {
    "OK"
}
