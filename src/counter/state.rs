//! Counter bounds and snapshot types.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::mvi::State;

/// Errors raised when constructing counter bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("Invalid range: min ({min}) is greater than max ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("Initial value {initial} is outside [{min}, {max}]")]
    InitialOutOfRange { initial: i64, min: i64, max: i64 },
}

/// Inclusive value range plus the value `reset` returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterBounds {
    initial_value: i64,
    min: i64,
    max: i64,
}

impl CounterBounds {
    /// Create bounds, checking `min <= initial_value <= max`.
    pub fn new(initial_value: i64, min: i64, max: i64) -> Result<Self, BoundsError> {
        if min > max {
            return Err(BoundsError::InvalidRange { min, max });
        }
        if initial_value < min || initial_value > max {
            return Err(BoundsError::InitialOutOfRange {
                initial: initial_value,
                min,
                max,
            });
        }
        Ok(Self {
            initial_value,
            min,
            max,
        })
    }

    pub fn initial_value(&self) -> i64 {
        self.initial_value
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// `min ~ max`, with `∞` for unbounded ends.
    pub fn range_label(&self) -> String {
        format!("{} ~ {}", bound_label(self.min), bound_label(self.max))
    }
}

/// A single bound for display: `i64::MIN`/`i64::MAX` read as `-∞`/`∞`.
pub fn bound_label(bound: i64) -> String {
    match bound {
        i64::MIN => "-∞".to_string(),
        i64::MAX => "∞".to_string(),
        other => other.to_string(),
    }
}

impl Default for CounterBounds {
    fn default() -> Self {
        Self {
            initial_value: 0,
            min: i64::MIN,
            max: i64::MAX,
        }
    }
}

/// When a snapshot was last confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastUpdated {
    /// Confirmed at the given wall-clock time.
    At(SystemTime),

    /// Speculative projection still waiting for confirmation.
    Pending,
}

impl LastUpdated {
    pub fn now() -> Self {
        Self::At(SystemTime::now())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Human-readable label: `HH:MM:SS UTC`, or `updating...` while pending.
    pub fn label(&self) -> String {
        match self {
            LastUpdated::Pending => "updating...".to_string(),
            LastUpdated::At(at) => {
                let secs = at
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                let of_day = secs % 86_400;
                format!(
                    "{:02}:{:02}:{:02} UTC",
                    of_day / 3600,
                    (of_day % 3600) / 60,
                    of_day % 60
                )
            }
        }
    }
}

/// Counter snapshot, used both for the confirmed state and for projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
    pub last_updated: LastUpdated,
    /// Number of confirmed actions. Never bumped by projections.
    pub update_count: u64,
}

impl State for CounterState {}

impl CounterState {
    /// Fresh confirmed state at the initial value.
    pub fn initial(bounds: &CounterBounds) -> Self {
        Self {
            value: bounds.initial_value(),
            last_updated: LastUpdated::now(),
            update_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn bounds_reject_inverted_range() {
        assert_eq!(
            CounterBounds::new(0, 10, 0),
            Err(BoundsError::InvalidRange { min: 10, max: 0 })
        );
    }

    #[test]
    fn bounds_reject_initial_outside_range() {
        assert!(matches!(
            CounterBounds::new(11, 0, 10),
            Err(BoundsError::InitialOutOfRange { initial: 11, .. })
        ));
    }

    #[test]
    fn bounds_allow_degenerate_range() {
        let bounds = CounterBounds::new(3, 3, 3).unwrap();
        assert_eq!(bounds.clamp(-100), 3);
        assert_eq!(bounds.clamp(100), 3);
    }

    #[test]
    fn unbounded_ends_render_as_infinity() {
        assert_eq!(bound_label(i64::MIN), "-∞");
        assert_eq!(bound_label(i64::MAX), "∞");
        assert_eq!(bound_label(-3), "-3");
        assert_eq!(CounterBounds::default().range_label(), "-∞ ~ ∞");
        assert_eq!(CounterBounds::new(5, 0, 10).unwrap().range_label(), "0 ~ 10");
    }

    #[test]
    fn label_formats_time_of_day() {
        let at = UNIX_EPOCH + Duration::from_secs(86_400 * 3 + 3600 * 13 + 60 * 7 + 9);
        assert_eq!(LastUpdated::At(at).label(), "13:07:09 UTC");
        assert_eq!(LastUpdated::Pending.label(), "updating...");
    }
}
