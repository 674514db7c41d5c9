//! Temperature Routes

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{error::ApiError, AppState};
use storage::{
    parse_date, trailing_window_start, StorageError, TemperatureObservation, TemperatureStats,
};

/// Observations of the most active station over the trailing window
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let latest = state.latest_date.ok_or(StorageError::NotFound)?;
    let station = state.repository.most_active_station().await?;
    let since = trailing_window_start(latest, state.tobs_window_days);

    debug!("Temperature history for {} from {} to {}", station, since, latest);
    let observations = state
        .repository
        .temperature_history_for_station(&station, since)
        .await?;

    Ok(Json(observations))
}

/// Stats from `start` through the latest date in the dataset
pub async fn get_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let start = parse_date(&start)?;

    let stats = match state.latest_date {
        Some(latest) => state.repository.temperature_stats(start, latest).await?,
        None => TemperatureStats::default(),
    };

    Ok(Json(stats))
}

/// Stats over the inclusive range `[start, end]`
pub async fn get_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;

    let stats = state.repository.temperature_stats(start, end).await?;
    Ok(Json(stats))
}
