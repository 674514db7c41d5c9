//! Service Configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (`climate.toml`, or the path in `CLIMATE_CONFIG`), then `CLIMATE_*`
//! environment variables.

use std::str::FromStr;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Level;

/// Default dataset location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Resources/hawaii.sqlite";

/// Default settings file
pub const DEFAULT_CONFIG_FILE: &str = "climate.toml";

/// Longest accepted `/tobs` window, one century
pub const MAX_TOBS_WINDOW_DAYS: u32 = 36_525;

/// Runtime settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite dataset URL, opened read-only
    pub database_url: String,
    /// Listen address
    pub bind_addr: String,
    /// Connection pool size
    pub max_connections: u32,
    /// Length of the `/tobs` window, counted back from the latest date
    pub tobs_window_days: u32,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Maximum tracing level
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Settings {
    /// Load settings from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("CLIMATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load settings from `path` (if it exists) and environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_addr", "127.0.0.1:5000")?
            .set_default("max_connections", 5)?
            .set_default("tobs_window_days", 365)?
            .set_default("request_timeout_secs", 30)?
            .set_default("log_level", "info")?
            .set_default("log_json", false)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("CLIMATE").try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Message(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.tobs_window_days > MAX_TOBS_WINDOW_DAYS {
            return Err(ConfigError::Message(format!(
                "tobs_window_days must be at most {MAX_TOBS_WINDOW_DAYS}"
            )));
        }
        self.tracing_level()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn tracing_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Message(format!("unknown log_level {}", self.log_level)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.toml");
        std::fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("/nonexistent/climate.toml").unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.tobs_window_days, 365);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.tracing_level().unwrap(), Level::INFO);
        assert!(!settings.log_json);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
            database_url = "sqlite://data/climate.sqlite"
            bind_addr = "0.0.0.0:8080"
            tobs_window_days = 30
            log_level = "debug"
            "#,
        );

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.database_url, "sqlite://data/climate.sqlite");
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.tobs_window_days, 30);
        assert_eq!(settings.tracing_level().unwrap(), Level::DEBUG);
        assert_eq!(settings.max_connections, 5);
    }

    #[test]
    fn test_rejects_zero_pool() {
        let (_dir, path) = write_config("max_connections = 0");
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_rejects_oversized_tobs_window() {
        let (_dir, path) = write_config("tobs_window_days = 100000000");
        assert!(Settings::load_from(&path).is_err());

        let (_dir, path) = write_config(&format!("tobs_window_days = {MAX_TOBS_WINDOW_DAYS}"));
        assert_eq!(
            Settings::load_from(&path).unwrap().tobs_window_days,
            MAX_TOBS_WINDOW_DAYS
        );
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let (_dir, path) = write_config(r#"log_level = "chatty""#);
        assert!(Settings::load_from(&path).is_err());
    }
}
