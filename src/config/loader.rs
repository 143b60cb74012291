use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::counter::CounterBounds;

/// Smallest accepted UI redraw interval.
pub const MIN_TICK_RATE_MS: u64 = 10;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/optimistic-counter/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("optimistic-counter").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path` and validates it.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses `path` without validating.
    ///
    /// Used when later layers (presets, command-line flags) may still
    /// replace the values; validate the merged result instead.
    pub fn parse_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `min <= initial_value <= max`
    /// - `step >= 1`
    /// - `failure_probability` is within `[0, 1]`
    /// - `tick_rate_ms >= MIN_TICK_RATE_MS`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;

        if self.counter.step == 0 {
            return Err(ConfigError::ValidationError {
                message: "Counter step must be at least 1".to_string(),
            });
        }

        let p = self.remote.failure_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ValidationError {
                message: format!("Failure probability {} is outside [0, 1]", p),
            });
        }

        if self.ui.tick_rate_ms < MIN_TICK_RATE_MS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Tick rate {}ms is below the minimum of {}ms",
                    self.ui.tick_rate_ms, MIN_TICK_RATE_MS
                ),
            });
        }

        Ok(())
    }

    /// Counter bounds described by this config.
    pub fn bounds(&self) -> Result<CounterBounds, ConfigError> {
        CounterBounds::new(self.counter.initial_value, self.counter.min, self.counter.max).map_err(
            |e| ConfigError::ValidationError {
                message: e.to_string(),
            },
        )
    }
}
