//! Counter actions.

use std::fmt;

use crate::mvi::Intent;

/// A discrete counter intent.
///
/// Steps are unsigned: direction is carried by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterAction {
    /// Move the value up by `step`, saturating at the upper bound.
    Increment { step: u64 },

    /// Move the value down by `step`, saturating at the lower bound.
    Decrement { step: u64 },

    /// Return to the configured initial value.
    Reset,
}

impl Intent for CounterAction {}

impl CounterAction {
    pub fn increment(step: u64) -> Self {
        Self::Increment { step }
    }

    pub fn decrement(step: u64) -> Self {
        Self::Decrement { step }
    }
}

impl fmt::Display for CounterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterAction::Increment { step } => write!(f, "+{}", step),
            CounterAction::Decrement { step } => write!(f, "-{}", step),
            CounterAction::Reset => write!(f, "reset"),
        }
    }
}
