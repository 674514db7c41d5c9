//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::ApiError, AppState};
use storage::Station;

/// Every station code and name
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let stations = state.repository.list_stations().await?;
    Ok(Json(stations))
}
