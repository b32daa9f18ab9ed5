//! Timestamp type used throughout the core.
//!
//! Timestamps are Unix epoch milliseconds supplied by the host. The core never
//! reads the wall clock itself, which keeps every transition deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one second.
const SECOND_MILLIS: u64 = 1_000;

/// Milliseconds in one day.
pub const DAY_MILLIS: u64 = 24 * 60 * 60 * SECOND_MILLIS;

/// Milliseconds in a 365-day year, the denominator for annual reward rates.
pub const YEAR_MILLIS: u64 = 365 * DAY_MILLIS;

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since this timestamp (relative to `now`).
    /// Saturates at zero if `now` is earlier.
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// `self + millis`, or `None` on overflow.
    pub fn checked_add(&self, millis: u64) -> Option<Timestamp> {
        self.0.checked_add(millis).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates() {
        let t = Timestamp::new(100);
        assert_eq!(t.elapsed_since(Timestamp::new(150)), 50);
        assert_eq!(t.elapsed_since(Timestamp::new(50)), 0);
    }

    #[test]
    fn checked_add_overflow() {
        assert_eq!(Timestamp::new(u64::MAX).checked_add(1), None);
        assert_eq!(Timestamp::new(1).checked_add(2), Some(Timestamp::new(3)));
    }
}
