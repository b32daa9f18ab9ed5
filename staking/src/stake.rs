//! A single owner's locked stake.

use serde::{Deserialize, Serialize};
use vesta_types::{Address, StakeId, Timestamp};

/// One user's locked stake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub id: StakeId,
    pub owner: Address,
    /// Locked principal in raw units. This is the owner's voting power.
    pub principal: u128,
    /// When the record was created. Top-ups do not reset it.
    pub staked_at: Timestamp,
    /// Start of the current accrual window.
    pub last_reward_claim: Timestamp,
    /// Settled but not yet paid out.
    pub pending_rewards: u128,
    /// Lifetime rewards paid to the owner from this record.
    pub rewards_claimed: u128,
}

impl StakeRecord {
    pub fn new(id: StakeId, owner: Address, principal: u128, now: Timestamp) -> Self {
        Self {
            id,
            owner,
            principal,
            staked_at: now,
            last_reward_claim: now,
            pending_rewards: 0,
            rewards_claimed: 0,
        }
    }
}
