//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `envmon.toml` in the working directory, or at the path given by
//! `ENVMON_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::time::Duration;

use envmon_app::monitor::Cadence;
use envmon_domain::error::ThresholdError;
use envmon_domain::payload::PayloadOptions;
use envmon_domain::thresholds::Thresholds;
use serde::Deserialize;

const DEFAULT_PATH: &str = "envmon.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote collector settings.
    pub collector: CollectorConfig,
    /// Loop cadence.
    pub polling: PollingConfig,
    /// Sensor board selection.
    pub sensors: SensorsConfig,
    /// LED rules.
    pub thresholds: Thresholds,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where and how records are sent.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Base URL; records go to `{base_url}/api/data`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Send the `dht_ok` / `ldr_ok` / `pir_ok` diagnostic keys.
    pub include_diagnostics: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_secs: u64,
    /// Ceiling for the pause while the collector is unreachable.
    pub max_backoff_secs: u64,
    /// Stop after this many cycles instead of running until a signal.
    pub max_cycles: Option<u64>,
}

/// Which sensor board backs the `SensorPort`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorMode {
    #[default]
    Simulated,
    Live,
}

impl std::str::FromStr for SensorMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "live" => Ok(Self::Live),
            other => Err(ConfigError::Validation(format!(
                "unknown sensor mode {other:?}, expected \"simulated\" or \"live\""
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub mode: SensorMode,
    /// Fit the distance, gas and sound sensors.
    pub extended: bool,
    /// Seed for the simulated board.
    pub seed: Option<u64>,
    /// Pin assignment of the live board, read only in live mode.
    #[cfg_attr(not(feature = "hardware"), allow(dead_code))]
    pub pins: toml::Table,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present), then apply
    /// environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, if an override
    /// cannot be parsed, or if the result is not a valid configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ENVMON_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("ENVMON_COLLECTOR_URL") {
            self.collector.base_url = val;
        }
        if let Some(val) = var("ENVMON_INTERVAL_SECS") {
            let secs = val.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("ENVMON_INTERVAL_SECS is not a number: {val:?}"))
            })?;
            self.polling.interval_secs = secs;
            self.polling.max_backoff_secs = self.polling.max_backoff_secs.max(secs);
        }
        if let Some(val) = var("ENVMON_MODE") {
            self.sensors.mode = val.parse()?;
        }
        if let Some(val) = var("ENVMON_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.collector.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "collector base_url must not be empty".to_string(),
            ));
        }
        if self.collector.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "collector timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "polling interval_secs must be non-zero".to_string(),
            ));
        }
        if self.polling.max_backoff_secs < self.polling.interval_secs {
            return Err(ConfigError::Validation(format!(
                "polling max_backoff_secs ({}) must be at least interval_secs ({})",
                self.polling.max_backoff_secs, self.polling.interval_secs
            )));
        }
        if self.polling.max_cycles == Some(0) {
            return Err(ConfigError::Validation(
                "polling max_cycles must be non-zero when set".to_string(),
            ));
        }
        if self.sensors.mode == SensorMode::Live {
            self.check_live_mode()?;
        }
        Ok(())
    }

    #[cfg(feature = "hardware")]
    fn check_live_mode(&self) -> Result<(), ConfigError> {
        self.pins().map(|_| ())
    }

    #[cfg(not(feature = "hardware"))]
    #[allow(clippy::unused_self)]
    fn check_live_mode(&self) -> Result<(), ConfigError> {
        Err(ConfigError::Validation(
            "sensors mode \"live\" requires envmond to be built with the `hardware` feature"
                .to_string(),
        ))
    }

    /// Pin assignment of the live board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `[sensors.pins]` names an unknown
    /// pin or has a value of the wrong type.
    #[cfg(feature = "hardware")]
    pub fn pins(&self) -> Result<envmon_adapter_gpio::PinConfig, ConfigError> {
        toml::Value::Table(self.sensors.pins.clone())
            .try_into()
            .map_err(ConfigError::Parse)
    }

    /// Loop cadence derived from `[polling]`.
    #[must_use]
    pub fn cadence(&self) -> Cadence {
        Cadence {
            interval: Duration::from_secs(self.polling.interval_secs),
            max_backoff: Duration::from_secs(self.polling.max_backoff_secs),
            max_cycles: self.polling.max_cycles,
        }
    }

    #[must_use]
    pub fn collector_timeout(&self) -> Duration {
        Duration::from_secs(self.collector.timeout_secs)
    }

    /// Optional key groups of the collector payload.
    #[must_use]
    pub fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            include_diagnostics: self.collector.include_diagnostics,
            extended: self.sensors.extended,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.1.162:5000".to_string(),
            timeout_secs: 5,
            include_diagnostics: true,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_backoff_secs: 5,
            max_cycles: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "envmond=info,envmon=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Threshold rules that cannot work.
    #[error("invalid thresholds")]
    Thresholds(#[from] ThresholdError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
