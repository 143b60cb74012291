//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are values, not callbacks: a host turns a key press or a
/// button activation into an intent and hands it over, so the state
/// machine never depends on a particular event system.
pub trait Intent: Copy + Send + 'static {}
