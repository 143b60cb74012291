//! Sample sources for failure injection.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of samples in `[0, 1)`.
///
/// A confirmation fails when the drawn sample is below the configured
/// failure probability.
pub trait ProbabilitySource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl ProbabilitySource for ThreadRandom {
    fn sample(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Seeded RNG, for reproducible runs.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ProbabilitySource for SeededRandom {
    fn sample(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }
}

/// Fixed sequence of samples, cycled when exhausted.
///
/// An empty sequence always yields `0.0`.
pub struct ScriptedSamples {
    samples: Vec<f64>,
    cursor: AtomicUsize,
}

impl ScriptedSamples {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl ProbabilitySource for ScriptedSamples {
    fn sample(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.samples.len();
        self.samples[idx]
    }
}

/// Same sample every time.
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub f64);

impl ProbabilitySource for Constant {
    fn sample(&self) -> f64 {
        self.0
    }
}
