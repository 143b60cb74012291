//! Configuration: TOML file, named presets and validation.

mod loader;
mod preset;
mod types;

pub use loader::{ConfigError, MIN_TICK_RATE_MS};
pub use preset::Preset;
pub use types::{Config, CounterConfig, RemoteConfig, UiConfig};
