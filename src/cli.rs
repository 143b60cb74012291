//! Command-line interface.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, Preset};

/// Optimistic-update counter backed by a simulated server.
#[derive(Debug, Parser)]
#[command(name = "optimistic-counter", version)]
pub struct Cli {
    /// Config file (default: ~/.config/optimistic-counter/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start from a named preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Initial counter value, also the reset target
    #[arg(long, allow_negative_numbers = true)]
    pub initial: Option<i64>,

    /// Inclusive lower bound
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Inclusive upper bound
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Increment/decrement unit
    #[arg(long)]
    pub step: Option<u64>,

    /// Simulated server latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Probability (0-1) that the simulated server rejects an update
    #[arg(long, value_name = "RATE")]
    pub error_rate: Option<f64>,

    /// Seed for reproducible failures
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run headless: comma-separated actions such as "+1,-5,reset"
    #[arg(long, value_name = "ACTIONS", allow_hyphen_values = true)]
    pub script: Option<String>,

    /// Print the available presets and exit
    #[arg(long)]
    pub list_presets: bool,
}

impl Cli {
    /// Build the effective config.
    ///
    /// Precedence: command-line flags, then preset, then config file, then
    /// built-in defaults. Only the merged result is validated.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
                });
            }
            Some(path) => Config::parse_from(path)?,
            None => Config::parse_from(&Config::config_path())?,
        };

        if let Some(preset) = self.preset {
            preset.apply(&mut config);
        }
        self.apply_overrides(&mut config);

        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(initial) = self.initial {
            config.counter.initial_value = initial;
        }
        if let Some(min) = self.min {
            config.counter.min = min;
        }
        if let Some(max) = self.max {
            config.counter.max = max;
        }
        if let Some(step) = self.step {
            config.counter.step = step;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.remote.delay_ms = delay_ms;
        }
        if let Some(rate) = self.error_rate {
            config.remote.failure_probability = rate;
        }
        if let Some(seed) = self.seed {
            config.remote.seed = Some(seed);
        }
    }
}
