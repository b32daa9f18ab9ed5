//! Governance proposals and what they change.

use crate::error::GovernanceError;
use crate::params::GovernableParam;
use serde::{Deserialize, Serialize};
use vesta_types::{Address, ProposalId, ProposalKind, ProposalStatus, Role, Timestamp};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LENGTH: usize = 128;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 4_096;

/// Longest accepted feature flag name, in characters.
pub const MAX_FEATURE_NAME_LENGTH: usize = 64;

/// The effect applied when a passed proposal is executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalAction {
    /// Change a numeric protocol parameter.
    ParameterChange {
        param: GovernableParam,
        new_value: u128,
    },
    /// Turn a named feature on or off.
    FeatureFlag { feature: String, enabled: bool },
    /// Assign a role, or remove the identity when `role` is `None`.
    AdminRole { address: Address, role: Option<Role> },
    /// Text-only proposal; executing it changes nothing.
    Signal,
}

impl ProposalAction {
    /// Whether this action may be carried by a proposal of `kind`.
    pub fn allowed_for(&self, kind: ProposalKind) -> bool {
        match kind {
            ProposalKind::Emergency => true,
            ProposalKind::Parameter => matches!(
                self,
                Self::ParameterChange { .. } | Self::AdminRole { .. } | Self::Signal
            ),
            ProposalKind::Feature => matches!(self, Self::FeatureFlag { .. } | Self::Signal),
        }
    }

    /// Payload checks that do not depend on current state.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        match self {
            Self::ParameterChange { param, new_value } => param.validate(*new_value),
            Self::FeatureFlag { feature, .. } => {
                let len = feature.chars().count();
                if feature.trim().is_empty() || len > MAX_FEATURE_NAME_LENGTH {
                    return Err(GovernanceError::InvalidProposal(format!(
                        "feature name must be 1..={MAX_FEATURE_NAME_LENGTH} characters"
                    )));
                }
                Ok(())
            }
            Self::AdminRole { .. } | Self::Signal => Ok(()),
        }
    }
}

/// Caller-supplied content of a new proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub kind: ProposalKind,
    pub action: ProposalAction,
}

impl ProposalDraft {
    /// Check lengths, kind/action compatibility, and payload ranges.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        let title_len = self.title.chars().count();
        if self.title.trim().is_empty() || title_len > MAX_TITLE_LENGTH {
            return Err(GovernanceError::InvalidProposal(format!(
                "title must be 1..={MAX_TITLE_LENGTH} characters, got {title_len}"
            )));
        }
        let description_len = self.description.chars().count();
        if self.description.trim().is_empty() || description_len > MAX_DESCRIPTION_LENGTH {
            return Err(GovernanceError::InvalidProposal(format!(
                "description must be 1..={MAX_DESCRIPTION_LENGTH} characters, got {description_len}"
            )));
        }
        if !self.action.allowed_for(self.kind) {
            return Err(GovernanceError::InvalidProposal(format!(
                "{} proposals cannot carry this action",
                self.kind
            )));
        }
        self.action.validate()
    }
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub proposer: Address,
    pub title: String,
    pub description: String,
    pub kind: ProposalKind,
    pub action: ProposalAction,
    pub status: ProposalStatus,
    pub votes_for: u128,
    pub votes_against: u128,
    pub voter_count: u64,
    /// Proposer's voting power when the proposal was created.
    pub proposer_power: u128,
    /// Quorum snapshot taken at creation.
    pub min_voting_power_required: u128,
    pub created_at: Timestamp,
    /// Last instant at which a vote is accepted.
    pub voting_end: Timestamp,
    /// Earliest instant a non-emergency proposal may execute.
    pub execution_time: Timestamp,
    pub finalized_at: Option<Timestamp>,
    pub executed_at: Option<Timestamp>,
    pub executed_by: Option<Address>,
}

impl ProposalRecord {
    /// Total power cast, for quorum.
    pub fn total_votes(&self) -> u128 {
        self.votes_for.saturating_add(self.votes_against)
    }

    /// Outcome the current tally would produce at finalize time.
    /// A tie or a missed quorum rejects.
    pub fn tally_outcome(&self) -> ProposalStatus {
        if self.votes_for > self.votes_against
            && self.total_votes() >= self.min_voting_power_required
        {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        }
    }

    /// Whether the timelock (if any) has elapsed at `now`.
    pub fn is_executable_at(&self, now: Timestamp) -> bool {
        self.kind == ProposalKind::Emergency || now >= self.execution_time
    }
}
