//! Precipitation Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::ApiError, AppState};
use storage::PrecipitationRecord;

/// Date and precipitation of every measurement
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, ApiError> {
    let records = state.repository.list_precipitation().await?;
    Ok(Json(records))
}
