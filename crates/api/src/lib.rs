//! Climate API Server
//!
//! Read-only REST API over the station and measurement dataset.

use axum::{
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::{ApiError, ErrorBody};
pub use routes::index::WELCOME;
pub use settings::Settings;

use storage::{Repository, StorageError};

/// Application state shared across handlers
pub struct AppState {
    /// Read-only dataset repository
    pub repository: Repository,
    /// Latest measurement date, snapshotted at startup
    pub latest_date: Option<NaiveDate>,
    /// Length of the `/tobs` window in days
    pub tobs_window_days: u32,
}

impl AppState {
    /// Build state, taking the latest-date snapshot from `repository`
    pub async fn new(repository: Repository, tobs_window_days: u32) -> Result<Self, StorageError> {
        let latest_date = repository.latest_date().await?;
        match latest_date {
            Some(date) => info!("Latest measurement date {}", date),
            None => info!("Dataset has no measurements"),
        }

        Ok(Self {
            repository,
            latest_date,
            tobs_window_days,
        })
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/", get(routes::index::get_index))
        .route(
            "/api/v1.0/precipitation",
            get(routes::precipitation::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::temperature::get_tobs))
        .route("/api/v1.0/:start", get(routes::temperature::get_stats_from))
        .route(
            "/api/v1.0/:start/:end",
            get(routes::temperature::get_stats_between),
        )
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors),
        )
}

async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    let body = ErrorBody {
        error: format!("No route for {}", uri.path()),
    };
    (StatusCode::NOT_FOUND, Json(body))
}

/// Initialize logging
pub fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let builder = FmtSubscriber::builder()
        .with_max_level(settings.tracing_level()?)
        .with_target(true);

    if settings.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Run the server until interrupted
pub async fn run_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let repository = Repository::connect(&settings.database_url, settings.max_connections).await?;
    info!(
        "Dataset holds {} stations and {} measurements",
        repository.station_count().await?,
        repository.measurement_count().await?
    );

    let state = Arc::new(AppState::new(repository, settings.tobs_window_days).await?);
    let app = create_router(state, settings.request_timeout());

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
