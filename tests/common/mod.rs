//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use optimistic_counter::counter::{CounterBounds, CounterStore};
use optimistic_counter::driver::{
    Constant, ProbabilitySource, ReconciliationDriver, ScriptedSamples, SimulatedRemote,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Simulated latency used by time-driven tests (clock is paused).
pub const DELAY: Duration = Duration::from_millis(500);

pub fn bounds(initial: i64, min: i64, max: i64) -> CounterBounds {
    CounterBounds::new(initial, min, max).expect("valid test bounds")
}

/// Driver whose remote fails with `failure_probability`, drawing from `source`.
pub fn driver_with_source(
    bounds: CounterBounds,
    failure_probability: f64,
    source: impl ProbabilitySource + 'static,
) -> ReconciliationDriver {
    let store = CounterStore::new(bounds);
    let remote =
        SimulatedRemote::new(store.reducer(), DELAY, failure_probability).with_source(source);
    ReconciliationDriver::new(store, Arc::new(remote))
}

/// Driver with a fixed error rate and a mid-range sample source, so 0.0
/// never fails and 1.0 always fails.
pub fn fixed_rate_driver(bounds: CounterBounds, error_rate: f64) -> ReconciliationDriver {
    driver_with_source(bounds, error_rate, Constant(0.5))
}

/// Driver whose successive confirmations fail or succeed per `outcomes`
/// (`true` = success).
pub fn scripted_driver(bounds: CounterBounds, outcomes: &[bool]) -> ReconciliationDriver {
    let samples: Vec<f64> = outcomes
        .iter()
        .map(|ok| if *ok { 0.9 } else { 0.1 })
        .collect();
    driver_with_source(bounds, 0.5, ScriptedSamples::new(samples))
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    let mut file = std::fs::File::create(&config_path).expect("Failed to create config");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    (temp_dir, config_path)
}
