//! Base trait for reducer-managed state.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything a host needs to render)
/// - Comparable (PartialEq for detecting changes)
pub trait State: Clone + PartialEq + Send + 'static {}
