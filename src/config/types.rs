use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Counter range and step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Starting value, also the target of `reset` (default: 0).
    #[serde(default)]
    pub initial_value: i64,
    /// Inclusive lower bound (default: unbounded).
    #[serde(default = "default_min")]
    pub min: i64,
    /// Inclusive upper bound (default: unbounded).
    #[serde(default = "default_max")]
    pub max: i64,
    /// Increment/decrement unit (default: 1).
    #[serde(default = "default_step")]
    pub step: u64,
}

/// Simulated remote behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Confirmation latency in milliseconds (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Chance in `[0, 1]` that a confirmation fails (default: 0.1).
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
    /// RNG seed for reproducible failures. Unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_min() -> i64 {
    i64::MIN
}

fn default_max() -> i64 {
    i64::MAX
}

fn default_step() -> u64 {
    1
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_failure_probability() -> f64 {
    0.1
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial_value: 0,
            min: default_min(),
            max: default_max(),
            step: default_step(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            failure_probability: default_failure_probability(),
            seed: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl RemoteConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
