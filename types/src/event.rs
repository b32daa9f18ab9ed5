//! Domain events returned by state transitions.
//!
//! Events are not consumed inside the core. Every operation returns the events
//! it produced alongside its value; the host persists or broadcasts them.

use crate::address::Address;
use crate::role::{Permission, Role};
use crate::state::{ProposalKind, ProposalStatus};
use crate::time::Timestamp;
use crate::{ProposalId, StakeId};
use serde::{Deserialize, Serialize};

/// An observable change produced by a successful call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainEvent {
    Stake {
        staker: Address,
        stake_id: StakeId,
        amount: u128,
        timestamp: Timestamp,
    },
    Unstake {
        staker: Address,
        stake_id: StakeId,
        amount: u128,
        rewards_claimed: u128,
        timestamp: Timestamp,
    },
    RewardClaimed {
        staker: Address,
        stake_id: StakeId,
        reward_amount: u128,
        timestamp: Timestamp,
    },
    ProposalCreated {
        proposal_id: ProposalId,
        proposer: Address,
        title: String,
        kind: ProposalKind,
        voting_end_timestamp: Timestamp,
    },
    VoteSubmitted {
        proposal_id: ProposalId,
        voter: Address,
        vote: bool,
        voting_power: u128,
    },
    ProposalFinalized {
        proposal_id: ProposalId,
        status: ProposalStatus,
        votes_for: u128,
        votes_against: u128,
        timestamp: Timestamp,
    },
    ProposalExecuted {
        proposal_id: ProposalId,
        status: ProposalStatus,
        timestamp: Timestamp,
    },
    ParameterChanged {
        param: String,
        old_value: u128,
        new_value: u128,
        version: u64,
    },
    FeatureToggled {
        feature: String,
        enabled: bool,
        version: u64,
    },
    AdminAdded {
        actor: Option<Address>,
        address: Address,
        role: Role,
        timestamp: Timestamp,
    },
    AdminRemoved {
        actor: Option<Address>,
        address: Address,
        timestamp: Timestamp,
    },
    AdminRoleUpdated {
        actor: Option<Address>,
        address: Address,
        old_role: Role,
        new_role: Role,
        timestamp: Timestamp,
    },
    PermissionChanged {
        actor: Address,
        address: Address,
        permission: Permission,
        granted: bool,
        timestamp: Timestamp,
    },
}

/// The value of a successful operation plus the events it emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<DomainEvent>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, events: Vec<DomainEvent>) -> Self {
        Self { value, events }
    }

    /// An outcome carrying exactly one event.
    pub fn with_event(value: T, event: DomainEvent) -> Self {
        Self {
            value,
            events: vec![event],
        }
    }

    /// An outcome that emitted nothing.
    pub fn silent(value: T) -> Self {
        Self {
            value,
            events: Vec::new(),
        }
    }

    /// Transform the value, keeping the events.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            events: self.events,
        }
    }
}
