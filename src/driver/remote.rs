//! Remote confirmation contract and its local simulation.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::counter::{CounterAction, CounterReducer, CounterState, LastUpdated};
use crate::mvi::Reducer;

use super::probability::{ProbabilitySource, SeededRandom, ThreadRandom};

/// Message surfaced when the simulated remote rejects an update.
pub const SIMULATED_FAILURE_MESSAGE: &str = "Server update failed";

/// Errors returned by a remote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The remote did not accept the update. Recovered by rollback.
    #[error("Confirmation failed: {message}")]
    ConfirmationFailed { message: String },
}

/// Authority that confirms counter actions.
///
/// A real backend would replace [`SimulatedRemote`]; the driver's contract
/// is the same either way.
#[async_trait]
pub trait CounterRemote: Send + Sync {
    /// Returns the name of this remote for logging.
    fn name(&self) -> &'static str;

    /// Apply `action` on top of `confirmed` and return the new
    /// authoritative state.
    async fn confirm(
        &self,
        confirmed: &CounterState,
        action: CounterAction,
    ) -> Result<CounterState, RemoteError>;
}

/// Timer-delayed stand-in for a backend with random failures.
pub struct SimulatedRemote {
    reducer: CounterReducer,
    delay: Duration,
    failure_probability: f64,
    source: Box<dyn ProbabilitySource>,
}

impl SimulatedRemote {
    /// `failure_probability` is clamped into `[0, 1]`; NaN counts as 0.
    pub fn new(reducer: CounterReducer, delay: Duration, failure_probability: f64) -> Self {
        let failure_probability = if failure_probability.is_nan() {
            0.0
        } else {
            failure_probability.clamp(0.0, 1.0)
        };
        Self {
            reducer,
            delay,
            failure_probability,
            source: Box::new(ThreadRandom),
        }
    }

    /// Build from config: seeded RNG when `seed` is set, thread RNG otherwise.
    pub fn from_config(config: &RemoteConfig, reducer: CounterReducer) -> Self {
        let remote = Self::new(reducer, config.delay(), config.failure_probability);
        match config.seed {
            Some(seed) => remote.with_source(SeededRandom::new(seed)),
            None => remote,
        }
    }

    /// Replace the sample source (seeded RNG, scripted samples in tests).
    pub fn with_source(mut self, source: impl ProbabilitySource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }
}

#[async_trait]
impl CounterRemote for SimulatedRemote {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn confirm(
        &self,
        confirmed: &CounterState,
        action: CounterAction,
    ) -> Result<CounterState, RemoteError> {
        tokio::time::sleep(self.delay).await;

        if self.source.sample() < self.failure_probability {
            return Err(RemoteError::ConfirmationFailed {
                message: SIMULATED_FAILURE_MESSAGE.to_string(),
            });
        }

        Ok(CounterState {
            value: self.reducer.reduce(*confirmed, action).value,
            last_updated: LastUpdated::now(),
            update_count: confirmed.update_count + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterBounds;
    use crate::driver::{Constant, ScriptedSamples};

    fn reducer() -> CounterReducer {
        CounterReducer::new(CounterBounds::new(10, 0, 20).unwrap())
    }

    fn confirmed(value: i64, update_count: u64) -> CounterState {
        CounterState {
            value,
            last_updated: LastUpdated::now(),
            update_count,
        }
    }

    #[test]
    fn failure_probability_is_clamped() {
        assert_eq!(SimulatedRemote::new(reducer(), Duration::ZERO, 1.5).failure_probability(), 1.0);
        assert_eq!(SimulatedRemote::new(reducer(), Duration::ZERO, -0.5).failure_probability(), 0.0);
        assert_eq!(SimulatedRemote::new(reducer(), Duration::ZERO, f64::NAN).failure_probability(), 0.0);
    }

    #[test]
    fn from_config_copies_delay_and_probability() {
        let config = RemoteConfig {
            delay_ms: 1200,
            failure_probability: 0.15,
            seed: Some(3),
        };
        let remote = SimulatedRemote::from_config(&config, reducer());
        assert_eq!(remote.delay(), Duration::from_millis(1200));
        assert_eq!(remote.failure_probability(), 0.15);
    }

    #[tokio::test(start_paused = true)]
    async fn success_applies_reducer_and_bumps_count() {
        let remote = SimulatedRemote::new(reducer(), Duration::from_millis(500), 0.0);
        let next = remote
            .confirm(&confirmed(19, 4), CounterAction::increment(5))
            .await
            .unwrap();

        assert_eq!(next.value, 20);
        assert_eq!(next.update_count, 5);
        assert!(!next.last_updated.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn certain_failure_always_fails() {
        let remote = SimulatedRemote::new(reducer(), Duration::from_millis(10), 1.0)
            .with_source(Constant(0.999));
        let err = remote
            .confirm(&confirmed(10, 0), CounterAction::Reset)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::ConfirmationFailed {
                message: SIMULATED_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sample_below_probability_fails() {
        let remote = SimulatedRemote::new(reducer(), Duration::ZERO, 0.3)
            .with_source(ScriptedSamples::new(vec![0.29, 0.3]));
        let state = confirmed(10, 0);

        assert!(remote.confirm(&state, CounterAction::increment(1)).await.is_err());
        assert!(remote.confirm(&state, CounterAction::increment(1)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let remote = SimulatedRemote::new(reducer(), Duration::from_millis(750), 0.0);
        let start = tokio::time::Instant::now();
        remote
            .confirm(&confirmed(10, 0), CounterAction::increment(1))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(750));
    }
}
