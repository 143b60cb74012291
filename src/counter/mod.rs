//! Optimistic counter domain.
//!
//! - `action.rs` - Discrete intents submitted by hosts
//! - `state.rs` - Bounds and the counter snapshot
//! - `reducer.rs` - Clamping transition rules
//! - `store.rs` - Confirmed state plus the speculative projection

mod action;
mod reducer;
mod state;
mod store;

pub use action::CounterAction;
pub use reducer::CounterReducer;
pub use state::{bound_label, BoundsError, CounterBounds, CounterState, LastUpdated};
pub use store::{ActionPhase, CounterStore, CounterView, PendingAction, StoreError, SyncStatus};
