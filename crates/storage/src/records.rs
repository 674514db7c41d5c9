//! Record types returned by the repository

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Weather observation site
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    /// Unique station code, e.g. `USC00519397`
    pub station: String,
    /// Display name
    pub name: String,
}

/// Full measurement row
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Measurement {
    pub station: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, absent for some observations
    pub prcp: Option<f64>,
    /// Temperature at observation
    pub tobs: f64,
}

/// Precipitation listing entry
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    pub date: String,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
}

/// Temperature history entry
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub station: String,
    pub tobs: f64,
}

/// Temperature aggregates over a date range.
///
/// All fields are `None` when no observation falls in the range.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow, Serialize, Deserialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
}

impl TemperatureStats {
    /// Whether any observation contributed to the aggregates
    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tmax.is_none() && self.tavg.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_upper_case_keys() {
        let stats = TemperatureStats {
            tmin: Some(80.0),
            tmax: Some(82.0),
            tavg: Some(81.0),
        };
        let json = serde_json_value(&stats);
        assert_eq!(json["TMIN"], 80.0);
        assert_eq!(json["TMAX"], 82.0);
        assert_eq!(json["TAVG"], 81.0);
    }

    #[test]
    fn test_empty_stats_serialize_as_null() {
        let stats = TemperatureStats::default();
        assert!(stats.is_empty());
        let json = serde_json_value(&stats);
        assert!(json["TMIN"].is_null());
        assert!(json["TMAX"].is_null());
        assert!(json["TAVG"].is_null());
    }

    #[test]
    fn test_missing_precipitation_is_null_not_zero() {
        let record = PrecipitationRecord {
            date: "2010-01-01".to_string(),
            precipitation: None,
        };
        let json = serde_json_value(&record);
        assert!(json["precipitation"].is_null());
    }

    fn serde_json_value<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }
}
