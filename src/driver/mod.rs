//! Reconciliation of optimistic projections against a remote.
//!
//! # Architecture
//!
//! - `probability.rs` - Injectable sample sources for failure simulation
//! - `remote.rs` - Remote contract and the timer-based simulation
//! - `reconcile.rs` - Per-action lifecycle driver
//! - `handle.rs` - Task wrapper consuming submit commands

mod handle;
mod probability;
mod reconcile;
mod remote;

pub use handle::{spawn, DriverCommand, DriverHandle};
pub use probability::{Constant, ProbabilitySource, ScriptedSamples, SeededRandom, ThreadRandom};
pub use reconcile::{DriverError, DriverEvent, ReconciliationDriver};
pub use remote::{CounterRemote, RemoteError, SimulatedRemote, SIMULATED_FAILURE_MESSAGE};
