//! Reducer trait.

use super::intent::Intent;
use super::state::State;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions are computed.
/// It must be a pure function of `(State, Intent)` plus whatever
/// immutable parameters the reducer value itself carries (for example
/// the bounds a counter clamps against).
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State;

    /// Apply intents left to right.
    fn fold<I>(&self, state: Self::State, intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents
            .into_iter()
            .fold(state, |acc, intent| self.reduce(acc, intent))
    }
}
