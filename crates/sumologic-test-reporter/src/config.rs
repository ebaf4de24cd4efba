use crate::error::ReporterError;
use std::env;

/// Default sync interval in milliseconds.
pub const DEFAULT_SYNC_INTERVAL_MS: u64 = 100;

/// Configuration for the Sumo Logic test reporter.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP collector source URL to push event batches to. Required.
    pub source_address: String,
    /// How often buffered events are pushed to the collector, in milliseconds.
    pub sync_interval_ms: u64,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_address: String::new(),
            sync_interval_ms: DEFAULT_SYNC_INTERVAL_MS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a configuration for the given collector source address with
    /// default settings.
    pub fn new(source_address: impl Into<String>) -> Self {
        Self {
            source_address: source_address.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SUMO_SOURCE_ADDRESS` (required), `SUMO_SYNC_INTERVAL`
    /// (optional, milliseconds) and `SUMO_LOG_LEVEL` (optional).
    pub fn from_env() -> Result<Self, ReporterError> {
        let source_address = env::var("SUMO_SOURCE_ADDRESS").map_err(|_| {
            ReporterError::InvalidConfig(
                "SUMO_SOURCE_ADDRESS environment variable is not set".to_string(),
            )
        })?;
        // A present but non-numeric interval is a configuration error, not a
        // silent fallback to the default.
        let sync_interval_ms = match env::var("SUMO_SYNC_INTERVAL") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ReporterError::InvalidConfig(format!(
                    "SUMO_SYNC_INTERVAL must be a number of milliseconds, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_SYNC_INTERVAL_MS,
        };
        let log_level = env::var("SUMO_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let config = Self {
            source_address,
            sync_interval_ms,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ReporterError> {
        if self.source_address.trim().is_empty() {
            return Err(ReporterError::InvalidConfig(
                "collector source address must not be empty".to_string(),
            ));
        }

        if self.sync_interval_ms == 0 {
            return Err(ReporterError::InvalidConfig(
                "sync interval must be greater than 0".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(ReporterError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}
