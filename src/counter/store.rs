//! Speculative state store.
//!
//! Holds the last confirmed state and at most one pending action. The
//! displayed state is never stored: it is recomputed from the confirmed
//! state and the pending action on every read.

use thiserror::Error;
use uuid::Uuid;

use crate::mvi::{Reducer, State};

use super::action::CounterAction;
use super::reducer::CounterReducer;
use super::state::{CounterBounds, CounterState, LastUpdated};

/// Errors raised by invalid store transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another action is still being reconciled.
    #[error("An update is already in progress")]
    Busy,

    /// Commit or rollback requested with nothing projected.
    #[error("No projected action to resolve (phase: {phase:?})")]
    NotProjected { phase: ActionPhase },

    /// Settle requested before the pending action was resolved.
    #[error("Pending action is not resolved yet (phase: {phase:?})")]
    NotResolved { phase: ActionPhase },
}

/// Lifecycle of a single submitted action.
///
/// `Idle → Projected → {Confirmed, RolledBack} → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    /// Nothing in flight; displayed equals confirmed.
    #[default]
    Idle,

    /// Optimistic value shown, confirmation outstanding.
    Projected,

    /// Confirmation arrived and became the new confirmed state.
    Confirmed,

    /// Confirmation failed; the prior confirmed state was re-asserted.
    RolledBack,
}

/// Action currently awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    /// Correlation id for logs.
    pub id: Uuid,
    pub action: CounterAction,
}

/// Coarse status for hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus<'a> {
    Pending,
    Failed(&'a str),
    Synced,
}

/// Snapshot published to rendering hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterView {
    pub displayed: CounterState,
    pub confirmed: CounterState,
    pub phase: ActionPhase,
    pub pending: Option<CounterAction>,
    pub last_error: Option<String>,
    pub bounds: CounterBounds,
}

impl State for CounterView {}

impl CounterView {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether an increment would change the displayed value.
    pub fn can_increment(&self) -> bool {
        self.displayed.value < self.bounds.max()
    }

    /// Whether a decrement would change the displayed value.
    pub fn can_decrement(&self) -> bool {
        self.displayed.value > self.bounds.min()
    }

    pub fn status(&self) -> SyncStatus<'_> {
        if self.is_pending() {
            SyncStatus::Pending
        } else if let Some(error) = self.last_error.as_deref() {
            SyncStatus::Failed(error)
        } else {
            SyncStatus::Synced
        }
    }
}

/// Owned state container. All mutation goes through
/// [`project`](Self::project), [`commit`](Self::commit),
/// [`roll_back`](Self::roll_back) and [`settle`](Self::settle).
#[derive(Debug, Clone)]
pub struct CounterStore {
    reducer: CounterReducer,
    confirmed: CounterState,
    pending: Option<PendingAction>,
    phase: ActionPhase,
    last_error: Option<String>,
}

impl CounterStore {
    pub fn new(bounds: CounterBounds) -> Self {
        Self {
            reducer: CounterReducer::new(bounds),
            confirmed: CounterState::initial(&bounds),
            pending: None,
            phase: ActionPhase::Idle,
            last_error: None,
        }
    }

    pub fn reducer(&self) -> CounterReducer {
        self.reducer
    }

    pub fn bounds(&self) -> &CounterBounds {
        self.reducer.bounds()
    }

    pub fn confirmed(&self) -> &CounterState {
        &self.confirmed
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Confirmed state with the pending action (if any) applied on top.
    pub fn displayed(&self) -> CounterState {
        match self.pending {
            Some(pending) => CounterState {
                last_updated: LastUpdated::Pending,
                ..self.reducer.reduce(self.confirmed, pending.action)
            },
            None => self.confirmed,
        }
    }

    pub fn view(&self) -> CounterView {
        CounterView {
            displayed: self.displayed(),
            confirmed: self.confirmed,
            phase: self.phase,
            pending: self.pending.map(|p| p.action),
            last_error: self.last_error.clone(),
            bounds: *self.bounds(),
        }
    }

    /// Start speculating on `action`. Returns the projected displayed state.
    pub fn project(&mut self, action: CounterAction) -> Result<CounterState, StoreError> {
        if self.phase != ActionPhase::Idle {
            return Err(StoreError::Busy);
        }

        let pending = PendingAction {
            id: Uuid::new_v4(),
            action,
        };
        self.pending = Some(pending);
        self.phase = ActionPhase::Projected;
        self.last_error = None;

        let displayed = self.displayed();
        tracing::debug!(
            action_id = %pending.id,
            action = %action,
            confirmed = self.confirmed.value,
            projected = displayed.value,
            "Projected action"
        );
        Ok(displayed)
    }

    /// Replace the confirmed state with an authoritative result.
    pub fn commit(&mut self, authoritative: CounterState) -> Result<(), StoreError> {
        self.expect_projected()?;

        self.confirmed = CounterState {
            value: self.reducer.bounds().clamp(authoritative.value),
            ..authoritative
        };
        self.pending = None;
        self.phase = ActionPhase::Confirmed;
        tracing::debug!(
            value = self.confirmed.value,
            update_count = self.confirmed.update_count,
            "Committed confirmed state"
        );
        Ok(())
    }

    /// Discard the projection, keeping the previous confirmed state.
    pub fn roll_back(&mut self, reason: impl Into<String>) -> Result<(), StoreError> {
        self.expect_projected()?;

        let reason = reason.into();
        self.pending = None;
        self.phase = ActionPhase::RolledBack;
        tracing::debug!(value = self.confirmed.value, reason = %reason, "Rolled back projection");
        self.last_error = Some(reason);
        Ok(())
    }

    /// Return to `Idle` after a commit or rollback.
    pub fn settle(&mut self) -> Result<(), StoreError> {
        match self.phase {
            ActionPhase::Confirmed | ActionPhase::RolledBack => {
                self.phase = ActionPhase::Idle;
                Ok(())
            }
            phase => Err(StoreError::NotResolved { phase }),
        }
    }

    fn expect_projected(&self) -> Result<(), StoreError> {
        match self.phase {
            ActionPhase::Projected => Ok(()),
            phase => Err(StoreError::NotProjected { phase }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(initial: i64, min: i64, max: i64) -> CounterStore {
        CounterStore::new(CounterBounds::new(initial, min, max).unwrap())
    }

    #[test]
    fn starts_idle_with_initial_value() {
        let s = store(10, 0, 20);
        assert_eq!(s.phase(), ActionPhase::Idle);
        assert_eq!(s.confirmed().value, 10);
        assert_eq!(s.confirmed().update_count, 0);
        assert_eq!(s.displayed(), *s.confirmed());
    }

    #[test]
    fn project_shows_optimistic_value() {
        let mut s = store(10, 0, 20);
        let projected = s.project(CounterAction::increment(1)).unwrap();

        assert_eq!(projected.value, 11);
        assert!(projected.last_updated.is_pending());
        assert_eq!(s.confirmed().value, 10);
        assert_eq!(s.phase(), ActionPhase::Projected);
    }

    #[test]
    fn second_projection_is_rejected() {
        let mut s = store(10, 0, 20);
        s.project(CounterAction::increment(1)).unwrap();
        assert_eq!(s.project(CounterAction::Reset), Err(StoreError::Busy));
        assert_eq!(s.displayed().value, 11);
    }

    #[test]
    fn commit_then_settle_collapses_projection() {
        let mut s = store(10, 0, 20);
        s.project(CounterAction::increment(1)).unwrap();
        s.commit(CounterState {
            value: 11,
            last_updated: LastUpdated::now(),
            update_count: 1,
        })
        .unwrap();
        assert_eq!(s.phase(), ActionPhase::Confirmed);
        s.settle().unwrap();

        assert_eq!(s.phase(), ActionPhase::Idle);
        assert_eq!(s.displayed(), *s.confirmed());
        assert_eq!(s.confirmed().value, 11);
        assert_eq!(s.confirmed().update_count, 1);
    }

    #[test]
    fn commit_clamps_out_of_range_result() {
        let mut s = store(10, 0, 20);
        s.project(CounterAction::increment(1)).unwrap();
        s.commit(CounterState {
            value: 99,
            last_updated: LastUpdated::now(),
            update_count: 1,
        })
        .unwrap();
        assert_eq!(s.confirmed().value, 20);
    }

    #[test]
    fn roll_back_restores_prior_confirmed_state() {
        let mut s = store(10, 0, 20);
        let before = *s.confirmed();
        s.project(CounterAction::decrement(1)).unwrap();
        assert_eq!(s.displayed().value, 9);

        s.roll_back("Server update failed").unwrap();
        s.settle().unwrap();

        assert_eq!(*s.confirmed(), before);
        assert_eq!(s.displayed(), before);
        assert_eq!(s.last_error(), Some("Server update failed"));
    }

    #[test]
    fn next_projection_clears_error() {
        let mut s = store(10, 0, 20);
        s.project(CounterAction::decrement(1)).unwrap();
        s.roll_back("boom").unwrap();
        s.settle().unwrap();

        s.project(CounterAction::increment(1)).unwrap();
        assert_eq!(s.last_error(), None);
    }

    #[test]
    fn resolve_without_projection_fails() {
        let mut s = store(0, 0, 10);
        assert_eq!(
            s.roll_back("nothing"),
            Err(StoreError::NotProjected {
                phase: ActionPhase::Idle
            })
        );
        assert_eq!(
            s.settle(),
            Err(StoreError::NotResolved {
                phase: ActionPhase::Idle
            })
        );
    }

    #[test]
    fn view_gates_on_bounds_and_pending() {
        let mut s = store(10, 0, 11);
        let view = s.view();
        assert!(view.can_increment());
        assert!(view.can_decrement());
        assert_eq!(view.status(), SyncStatus::Synced);

        s.project(CounterAction::increment(1)).unwrap();
        let view = s.view();
        assert!(view.is_pending());
        assert!(!view.can_increment());
        assert_eq!(view.status(), SyncStatus::Pending);
    }

    #[test]
    fn view_reports_failure_after_rollback() {
        let mut s = store(10, 0, 20);
        s.project(CounterAction::increment(1)).unwrap();
        s.roll_back("Server update failed").unwrap();
        s.settle().unwrap();
        assert_eq!(s.view().status(), SyncStatus::Failed("Server update failed"));
    }
}
