//! Storage Layer
//!
//! Read-only SQLite access to the climate dataset with repository pattern.

mod dates;
mod records;
mod repository;

pub use dates::{parse_date, trailing_window_start, DATE_FORMAT};
pub use records::{
    Measurement, PrecipitationRecord, Station, TemperatureObservation, TemperatureStats,
};
pub use repository::{Repository, SCHEMA};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Record not found")]
    NotFound,
    #[error("Malformed date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_) => StorageError::Unavailable(err.to_string()),
            sqlx::Error::RowNotFound => StorageError::NotFound,
            other => StorageError::DatabaseError(other.to_string()),
        }
    }
}
