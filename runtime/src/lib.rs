//! Transaction boundary for the Vesta core.
//!
//! Callers submit a [`Transaction`]: a sender plus an ordered bundle of
//! [`Call`]s, each naming a `module::function` target with positional JSON
//! arguments. The bundle runs against a working copy of the [`Ledger`] and
//! is committed only if every call succeeds.
//!
//! This is the only crate that logs; the component crates return their
//! events instead.

pub mod call;
pub mod dispatch;
pub mod error;
pub mod ledger;

pub use call::{Call, CallReturn, Receipt, Transaction};
pub use dispatch::TARGETS;
pub use error::RuntimeError;
pub use ledger::{Ledger, SNAPSHOT_FORMAT};
