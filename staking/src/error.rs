//! Stake pool errors.

use thiserror::Error;
use vesta_types::{Address, StakeId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("invalid stake amount {amount}: minimum is {minimum}")]
    InvalidStakeAmount { amount: u128, minimum: u128 },

    #[error("stake {0} not found")]
    StakeNotFound(StakeId),

    #[error("{caller} is not the owner of stake {stake_id}")]
    NotStaker { caller: Address, stake_id: StakeId },

    #[error("withdrawal of {requested} exceeds staked principal {principal}")]
    ExceedsPrincipal { requested: u128, principal: u128 },

    #[error("arithmetic overflow in stake accounting")]
    Overflow,
}
