//! Stake pool for the Vesta core.
//!
//! Users lock principal into a single stake record per owner and accrue
//! simple (non-compounding) interest over time:
//!
//! `reward = principal × rate_bps × elapsed_ms / (10_000 × YEAR_MILLIS)`
//!
//! This crate handles:
//! - Creating and topping up stake records
//! - Claiming accrued rewards (integer truncation, never rounding up)
//! - Partial and full unstaking with reward settlement
//! - Reporting voting power (principal only, never reward-inclusive)

pub mod error;
pub mod pool;
pub mod reward;
pub mod stake;

pub use error::StakingError;
pub use pool::{StakePool, Unstaked};
pub use reward::accrued_reward;
pub use stake::StakeRecord;
