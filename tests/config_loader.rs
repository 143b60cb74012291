mod common;

use common::temp_config;
use optimistic_counter::config::{Config, ConfigError, Preset};
use std::time::Duration;

#[test]
fn full_file_is_parsed() {
    let (_dir, path) = temp_config(
        r#"
[counter]
initial_value = -3
min = -20
max = 20
step = 4

[remote]
delay_ms = 250
failure_probability = 0.25
seed = 42

[ui]
tick_rate_ms = 100
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.counter.initial_value, -3);
    assert_eq!(config.counter.step, 4);
    assert_eq!(config.remote.delay(), Duration::from_millis(250));
    assert_eq!(config.remote.failure_probability, 0.25);
    assert_eq!(config.remote.seed, Some(42));
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(100));

    let bounds = config.bounds().unwrap();
    assert_eq!((bounds.min(), bounds.max()), (-20, 20));
}

#[test]
fn partial_file_keeps_defaults() {
    let (_dir, path) = temp_config("[remote]\ndelay_ms = 10\n");
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.remote.delay_ms, 10);
    assert_eq!(config.counter, Config::default().counter);
    assert_eq!(config.remote.failure_probability, 0.1);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let (_dir, path) = temp_config("[counter\ninitial_value = ");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn initial_outside_bounds_is_rejected() {
    let (_dir, path) = temp_config("[counter]\ninitial_value = 50\nmin = 0\nmax = 10\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn zero_step_is_rejected() {
    let (_dir, path) = temp_config("[counter]\nstep = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn every_preset_produces_a_valid_config() {
    for preset in Preset::all() {
        let mut config = Config::default();
        preset.apply(&mut config);
        assert!(config.validate().is_ok(), "{preset:?} is invalid");
    }
}
