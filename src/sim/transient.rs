//! Fire-once transient values
//!
//! Timers are modelled as deadlines checked by the owning widget's tick
//! instead of host timeouts, so clearing a widget cancels everything it
//! scheduled.

use serde::{Deserialize, Serialize};

/// A value that expires at a fixed time (ms, same clock as `now`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transient<T> {
    pub value: T,
    pub expires_at: f64,
}

impl<T> Transient<T> {
    pub fn new(value: T, now: f64, duration_ms: f64) -> Self {
        Self {
            value,
            expires_at: now + duration_ms,
        }
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at
    }

    /// Fraction of the lifetime left in [0, 1]
    pub fn remaining_fraction(&self, now: f64, duration_ms: f64) -> f32 {
        if duration_ms <= 0.0 {
            return 0.0;
        }
        ((self.expires_at - now) / duration_ms).clamp(0.0, 1.0) as f32
    }
}

/// Clear an optional transient once it has expired. Returns true if cleared.
pub fn expire_slot<T>(slot: &mut Option<Transient<T>>, now: f64) -> bool {
    if slot.as_ref().is_some_and(|t| t.is_expired(now)) {
        *slot = None;
        true
    } else {
        false
    }
}

/// Drop every expired entry. Returns how many were removed.
pub fn expire_all<T>(entries: &mut Vec<Transient<T>>, now: f64) -> usize {
    let before = entries.len();
    entries.retain(|t| !t.is_expired(now));
    before - entries.len()
}
