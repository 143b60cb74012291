//! Model-View-Intent (MVI) primitives.
//!
//! Unidirectional data flow shared by the counter store and the hosts
//! that render it.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot, replaced wholesale on every transition
//! - **Intent**: A discrete user action or system event
//! - **Reducer**: Pure function that maps (state, intent) to the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
