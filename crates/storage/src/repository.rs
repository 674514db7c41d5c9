//! Repository Implementation

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::dates::{parse_date, DATE_FORMAT};
use crate::records::{PrecipitationRecord, Station, TemperatureObservation, TemperatureStats};
use crate::StorageError;

/// Tables the repository reads from.
///
/// Source datasets may carry extra columns (ids, coordinates, elevation);
/// only the columns declared here are queried.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL NOT NULL
);
";

/// Read-only repository over the station and measurement tables
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open the dataset at `url` in read-only mode
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Unavailable(format!("invalid database url {url}: {e}")))?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Unavailable(format!("cannot open {url}: {e}")))?;

        info!("Opened read-only dataset at {}", url);
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Date and precipitation of every measurement
    pub async fn list_precipitation(&self) -> Result<Vec<PrecipitationRecord>, StorageError> {
        let records = sqlx::query_as::<_, PrecipitationRecord>(
            "SELECT date, CAST(prcp AS REAL) AS prcp FROM measurement ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} precipitation records", records.len());
        Ok(records)
    }

    /// Code and name of every station
    pub async fn list_stations(&self) -> Result<Vec<Station>, StorageError> {
        let stations =
            sqlx::query_as::<_, Station>("SELECT station, name FROM station ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        debug!("Loaded {} stations", stations.len());
        Ok(stations)
    }

    /// Station with the most measurements.
    ///
    /// Ties go to the lowest station code. Fails with `NotFound` when there
    /// are no measurements.
    pub async fn most_active_station(&self) -> Result<String, StorageError> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT station, COUNT(*) AS observations
             FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let (station, observations) = row.ok_or(StorageError::NotFound)?;
        debug!("Most active station {} with {} observations", station, observations);
        Ok(station)
    }

    /// Temperature observations of `station` dated `since` or later
    pub async fn temperature_history_for_station(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<TemperatureObservation>, StorageError> {
        let observations = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, station, CAST(tobs AS REAL) AS tobs
             FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY rowid",
        )
        .bind(station)
        .bind(since.format(DATE_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Loaded {} observations for {} since {}",
            observations.len(),
            station,
            since
        );
        Ok(observations)
    }

    /// Min, max and mean temperature over the inclusive range `[start, end]`
    pub async fn temperature_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TemperatureStats, StorageError> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                    CAST(MAX(tobs) AS REAL) AS tmax,
                    AVG(tobs) AS tavg
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(start.format(DATE_FORMAT).to_string())
        .bind(end.format(DATE_FORMAT).to_string())
        .fetch_one(&self.pool)
        .await?;

        debug!("Temperature stats {} to {}: {:?}", start, end, stats);
        Ok(stats)
    }

    /// Most recent measurement date, `None` for an empty dataset
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>, StorageError> {
        let (latest,): (Option<String>,) = sqlx::query_as("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        latest
            .map(|value| {
                parse_date(&value).map_err(|_| {
                    StorageError::DatabaseError(format!("unparseable measurement date {value}"))
                })
            })
            .transpose()
    }

    /// Total station count
    pub async fn station_count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Total measurement count
    pub async fn measurement_count(&self) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
