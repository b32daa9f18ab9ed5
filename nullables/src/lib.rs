//! Nullable infrastructure for deterministic testing.
//!
//! The core takes `now` as an argument on every call; these stand-ins let
//! tests drive that value explicitly instead of reading a wall clock.

pub mod clock;

pub use clock::NullClock;
