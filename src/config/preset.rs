//! Named demo configurations.

use clap::ValueEnum;

use crate::config::types::{Config, CounterConfig, RemoteConfig};

/// Ready-made counter setups covering latency and failure-rate extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 1s latency, 10% failures.
    Default,
    /// 200ms latency, never fails.
    FastResponse,
    /// 3s latency, 5% failures.
    SlowResponse,
    /// Fails half the time.
    HighErrorRate,
    /// Never fails.
    NoErrors,
    /// Value confined to [0, 10].
    LimitedRange,
    /// Steps of 10 within [-100, 100].
    LargeSteps,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[
            Preset::Default,
            Preset::FastResponse,
            Preset::SlowResponse,
            Preset::HighErrorRate,
            Preset::NoErrors,
            Preset::LimitedRange,
            Preset::LargeSteps,
        ]
    }

    /// Overwrite the counter and remote sections of `config`.
    ///
    /// UI settings and the RNG seed are left alone.
    pub fn apply(self, config: &mut Config) {
        let (initial_value, min, max, step, delay_ms, failure_probability) = match self {
            Preset::Default => (0, i64::MIN, i64::MAX, 1, 1000, 0.1),
            Preset::FastResponse => (50, i64::MIN, i64::MAX, 1, 200, 0.0),
            Preset::SlowResponse => (0, i64::MIN, i64::MAX, 1, 3000, 0.05),
            Preset::HighErrorRate => (10, i64::MIN, i64::MAX, 1, 1000, 0.5),
            Preset::NoErrors => (25, i64::MIN, i64::MAX, 1, 800, 0.0),
            Preset::LimitedRange => (5, 0, 10, 1, 1000, 0.2),
            Preset::LargeSteps => (0, -100, 100, 10, 1200, 0.15),
        };

        config.counter = CounterConfig {
            initial_value,
            min,
            max,
            step,
        };
        config.remote = RemoteConfig {
            delay_ms,
            failure_probability,
            seed: config.remote.seed,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for preset in Preset::all() {
            let mut config = Config::default();
            preset.apply(&mut config);
            assert!(config.validate().is_ok(), "{:?} is invalid", preset);
        }
    }

    #[test]
    fn default_preset_matches_defaults() {
        let mut config = Config::default();
        Preset::Default.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn apply_keeps_seed_and_ui() {
        let mut config = Config::default();
        config.remote.seed = Some(7);
        config.ui.tick_rate_ms = 100;

        Preset::LargeSteps.apply(&mut config);

        assert_eq!(config.remote.seed, Some(7));
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.counter.step, 10);
        assert_eq!(config.counter.min, -100);
    }
}
