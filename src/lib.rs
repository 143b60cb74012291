//! Optimistic-update counter.
//!
//! A counter whose displayed value changes the moment an action is
//! submitted, while a (simulated) server confirms the change in the
//! background. Confirmation commits the result; failure rolls the display
//! back to the last confirmed value.
//!
//! - [`counter`]: bounds, reducer and the speculative state store
//! - [`driver`]: reconciliation against a remote
//! - [`ui`] and [`script`]: interactive and headless hosts

pub mod cli;
pub mod config;
pub mod counter;
pub mod driver;
pub mod logging;
pub mod mvi;
pub mod script;
pub mod ui;
