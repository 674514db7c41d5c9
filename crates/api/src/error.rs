//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

/// Handler error, rendered as a JSON body with a matching status code
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] StorageError);

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Status code for the underlying failure
    pub fn status(&self) -> StatusCode {
        match self.0 {
            StorageError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            StorageError::NotFound => StatusCode::NOT_FOUND,
            StorageError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
