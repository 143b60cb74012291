//! Reducer for counter actions.

use crate::mvi::Reducer;

use super::action::CounterAction;
use super::state::{CounterBounds, CounterState};

/// Clamping transition rules.
///
/// Used for both the optimistic projection and the authoritative result,
/// so the two agree whenever confirmation succeeds. Only `value` changes;
/// bookkeeping fields belong to whoever confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterReducer {
    bounds: CounterBounds,
}

impl CounterReducer {
    pub fn new(bounds: CounterBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &CounterBounds {
        &self.bounds
    }
}

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterAction;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        let value = match intent {
            CounterAction::Increment { step } => {
                state.value.saturating_add_unsigned(step).min(self.bounds.max())
            }
            CounterAction::Decrement { step } => {
                state.value.saturating_sub_unsigned(step).max(self.bounds.min())
            }
            CounterAction::Reset => self.bounds.initial_value(),
        };

        CounterState { value, ..state }
    }
}
