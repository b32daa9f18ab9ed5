//! Nullable clock: deterministic time for testing.

use std::cell::Cell;
use vesta_types::Timestamp;

/// A deterministic clock in milliseconds.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_millis: u64) -> Self {
        Self {
            current: Cell::new(initial_millis),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of milliseconds. Saturates at `u64::MAX`.
    pub fn advance(&self, millis: u64) {
        self.current.set(self.current.get().saturating_add(millis));
    }

    /// Set the time to a specific value, which may move backwards.
    pub fn set(&self, millis: u64) {
        self.current.set(millis);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(10);
        assert_eq!(clock.now(), Timestamp::new(10));
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp::new(15));
        clock.set(3);
        assert_eq!(clock.now(), Timestamp::new(3));
    }
}
