//! The stake pool: owns every stake record and the pool totals.

use crate::error::StakingError;
use crate::reward::accrued_reward;
use crate::stake::StakeRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use vesta_types::{Address, DomainEvent, GovernanceParameters, Outcome, StakeId, Timestamp};

/// Principal and reward returned to the owner by a full unstake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unstaked {
    pub principal: u128,
    pub rewards: u128,
}

impl Unstaked {
    pub fn total(&self) -> u128 {
        self.principal.saturating_add(self.rewards)
    }
}

/// Owns stake records keyed by id, with an owner index.
///
/// Each owner holds at most one record; staking again tops it up.
/// `total_staked` always equals the sum of all record principals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakePool {
    next_stake_id: StakeId,
    stakes: BTreeMap<StakeId, StakeRecord>,
    by_owner: HashMap<Address, StakeId>,
    total_staked: u128,
    total_rewards_paid: u128,
}

impl StakePool {
    pub fn new() -> Self {
        Self {
            next_stake_id: 1,
            stakes: BTreeMap::new(),
            by_owner: HashMap::new(),
            total_staked: 0,
            total_rewards_paid: 0,
        }
    }

    /// Lock `amount` for `owner`, creating a record or topping up the existing one.
    ///
    /// On a top-up the reward accrued on the old principal is settled into
    /// `pending_rewards` first, so the added principal never earns retroactively.
    /// `staked_at` is left unchanged.
    pub fn stake(
        &mut self,
        owner: &Address,
        amount: u128,
        now: Timestamp,
        params: &GovernanceParameters,
    ) -> Result<Outcome<StakeId>, StakingError> {
        if amount == 0 || amount < params.min_stake {
            return Err(StakingError::InvalidStakeAmount {
                amount,
                minimum: params.min_stake,
            });
        }
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        let stake_id = match self.by_owner.get(owner).copied() {
            Some(id) => {
                let record = self.stakes.get(&id).ok_or(StakingError::StakeNotFound(id))?;
                let pending = settled_pending(record, now, params)?;
                let principal = record
                    .principal
                    .checked_add(amount)
                    .ok_or(StakingError::Overflow)?;

                let record = self
                    .stakes
                    .get_mut(&id)
                    .ok_or(StakingError::StakeNotFound(id))?;
                record.pending_rewards = pending;
                record.last_reward_claim = record.last_reward_claim.max(now);
                record.principal = principal;
                id
            }
            None => {
                let id = self.next_stake_id;
                let next = id.checked_add(1).ok_or(StakingError::Overflow)?;
                self.stakes
                    .insert(id, StakeRecord::new(id, owner.clone(), amount, now));
                self.by_owner.insert(owner.clone(), id);
                self.next_stake_id = next;
                id
            }
        };
        self.total_staked = total_staked;

        Ok(Outcome::with_event(
            stake_id,
            DomainEvent::Stake {
                staker: owner.clone(),
                stake_id,
                amount,
                timestamp: now,
            },
        ))
    }

    /// Settle and pay out every reward owed on a stake.
    ///
    /// Returns the amount paid. Calling again with no elapsed time pays zero
    /// and emits nothing.
    pub fn claim_rewards(
        &mut self,
        owner: &Address,
        stake_id: StakeId,
        now: Timestamp,
        params: &GovernanceParameters,
    ) -> Result<Outcome<u128>, StakingError> {
        let record = self.owned(owner, stake_id)?;
        let payout = settled_pending(record, now, params)?;
        let claimed = record
            .rewards_claimed
            .checked_add(payout)
            .ok_or(StakingError::Overflow)?;
        let paid = self
            .total_rewards_paid
            .checked_add(payout)
            .ok_or(StakingError::Overflow)?;

        let record = self.owned_mut(owner, stake_id)?;
        record.pending_rewards = 0;
        record.rewards_claimed = claimed;
        record.last_reward_claim = record.last_reward_claim.max(now);
        self.total_rewards_paid = paid;

        if payout == 0 {
            return Ok(Outcome::silent(0));
        }
        Ok(Outcome::with_event(
            payout,
            DomainEvent::RewardClaimed {
                staker: owner.clone(),
                stake_id,
                reward_amount: payout,
                timestamp: now,
            },
        ))
    }

    /// Settle rewards, destroy the record, and return principal plus rewards.
    pub fn unstake(
        &mut self,
        owner: &Address,
        stake_id: StakeId,
        now: Timestamp,
        params: &GovernanceParameters,
    ) -> Result<Outcome<Unstaked>, StakingError> {
        let record = self.owned(owner, stake_id)?;
        let rewards = settled_pending(record, now, params)?;
        let principal = record.principal;
        let total_staked = self
            .total_staked
            .checked_sub(principal)
            .ok_or(StakingError::Overflow)?;
        let paid = self
            .total_rewards_paid
            .checked_add(rewards)
            .ok_or(StakingError::Overflow)?;

        self.stakes.remove(&stake_id);
        self.by_owner.remove(owner);
        self.total_staked = total_staked;
        self.total_rewards_paid = paid;

        Ok(Outcome::with_event(
            Unstaked { principal, rewards },
            DomainEvent::Unstake {
                staker: owner.clone(),
                stake_id,
                amount: principal,
                rewards_claimed: rewards,
                timestamp: now,
            },
        ))
    }

    /// Withdraw part of a stake's principal.
    ///
    /// Withdrawing the full principal is a full [`unstake`](Self::unstake) and
    /// pays out rewards. Otherwise rewards are settled into `pending_rewards`
    /// and the remaining principal must still meet the minimum stake.
    pub fn withdraw(
        &mut self,
        owner: &Address,
        stake_id: StakeId,
        amount: u128,
        now: Timestamp,
        params: &GovernanceParameters,
    ) -> Result<Outcome<Unstaked>, StakingError> {
        let record = self.owned(owner, stake_id)?;
        if amount == 0 {
            return Err(StakingError::InvalidStakeAmount {
                amount,
                minimum: params.min_stake,
            });
        }
        if amount > record.principal {
            return Err(StakingError::ExceedsPrincipal {
                requested: amount,
                principal: record.principal,
            });
        }
        if amount == record.principal {
            return self.unstake(owner, stake_id, now, params);
        }

        let remaining = record.principal - amount;
        if remaining < params.min_stake {
            return Err(StakingError::InvalidStakeAmount {
                amount: remaining,
                minimum: params.min_stake,
            });
        }
        let pending = settled_pending(record, now, params)?;
        let total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::Overflow)?;

        let record = self.owned_mut(owner, stake_id)?;
        record.pending_rewards = pending;
        record.last_reward_claim = record.last_reward_claim.max(now);
        record.principal = remaining;
        self.total_staked = total_staked;

        Ok(Outcome::with_event(
            Unstaked {
                principal: amount,
                rewards: 0,
            },
            DomainEvent::Unstake {
                staker: owner.clone(),
                stake_id,
                amount,
                rewards_claimed: 0,
                timestamp: now,
            },
        ))
    }

    /// Current voting power of `owner`: staked principal, excluding rewards.
    pub fn voting_power_of(&self, owner: &Address) -> u128 {
        self.stake_of(owner).map(|r| r.principal).unwrap_or(0)
    }

    /// Rewards that a claim at `now` would pay, without mutating anything.
    pub fn pending_rewards(
        &self,
        stake_id: StakeId,
        now: Timestamp,
        params: &GovernanceParameters,
    ) -> Result<u128, StakingError> {
        let record = self
            .stakes
            .get(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        settled_pending(record, now, params)
    }

    pub fn get_stake(&self, stake_id: StakeId) -> Option<&StakeRecord> {
        self.stakes.get(&stake_id)
    }

    pub fn stake_of(&self, owner: &Address) -> Option<&StakeRecord> {
        self.by_owner.get(owner).and_then(|id| self.stakes.get(id))
    }

    pub fn stakes(&self) -> impl Iterator<Item = &StakeRecord> {
        self.stakes.values()
    }

    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn total_rewards_paid(&self) -> u128 {
        self.total_rewards_paid
    }

    pub fn staker_count(&self) -> usize {
        self.stakes.len()
    }

    fn owned(&self, owner: &Address, stake_id: StakeId) -> Result<&StakeRecord, StakingError> {
        let record = self
            .stakes
            .get(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        if record.owner != *owner {
            return Err(StakingError::NotStaker {
                caller: owner.clone(),
                stake_id,
            });
        }
        Ok(record)
    }

    fn owned_mut(
        &mut self,
        owner: &Address,
        stake_id: StakeId,
    ) -> Result<&mut StakeRecord, StakingError> {
        let record = self
            .stakes
            .get_mut(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        if record.owner != *owner {
            return Err(StakingError::NotStaker {
                caller: owner.clone(),
                stake_id,
            });
        }
        Ok(record)
    }
}

impl Default for StakePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending rewards plus whatever accrued since the last claim.
fn settled_pending(
    record: &StakeRecord,
    now: Timestamp,
    params: &GovernanceParameters,
) -> Result<u128, StakingError> {
    let elapsed = record.last_reward_claim.elapsed_since(now);
    accrued_reward(record.principal, params.reward_rate_bps, elapsed)
        .and_then(|r| r.checked_add(record.pending_rewards))
        .ok_or(StakingError::Overflow)
}
