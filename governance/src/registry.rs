//! Proposal registry: creates proposals, records ballots, finalizes outcomes.

use crate::error::GovernanceError;
use crate::power::VotingPower;
use crate::proposal::{ProposalDraft, ProposalRecord};
use crate::votes::{VoteLedger, VoteRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vesta_rbac::AdminRegistry;
use vesta_types::{
    Address, DomainEvent, GovernanceParameters, Outcome, Permission, ProposalId, ProposalKind,
    ProposalStatus, Timestamp,
};

/// Owns every proposal, keyed by sequential id starting at 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalRegistry {
    next_proposal_id: ProposalId,
    proposals: BTreeMap<ProposalId, ProposalRecord>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            next_proposal_id: 1,
            proposals: BTreeMap::new(),
        }
    }

    /// Create a proposal. It is `Active` immediately.
    ///
    /// The proposer must hold at least `min_proposer_stake` voting power;
    /// emergency proposals additionally require `manage_params`.
    pub fn create(
        &mut self,
        proposer: &Address,
        draft: ProposalDraft,
        now: Timestamp,
        power: &dyn VotingPower,
        params: &GovernanceParameters,
        admins: &AdminRegistry,
    ) -> Result<Outcome<ProposalId>, GovernanceError> {
        draft.validate()?;
        if draft.kind == ProposalKind::Emergency {
            admins.require(proposer, Permission::ManageParams)?;
        }
        let have = power.voting_power_of(proposer);
        if have < params.min_proposer_stake {
            return Err(GovernanceError::InsufficientStake {
                have,
                need: params.min_proposer_stake,
            });
        }
        let voting_end = now
            .checked_add(params.voting_period_ms)
            .ok_or(GovernanceError::Overflow)?;
        let execution_time = voting_end
            .checked_add(params.execution_delay_ms)
            .ok_or(GovernanceError::Overflow)?;
        let id = self.next_proposal_id;
        let next = id.checked_add(1).ok_or(GovernanceError::Overflow)?;

        let event = DomainEvent::ProposalCreated {
            proposal_id: id,
            proposer: proposer.clone(),
            title: draft.title.clone(),
            kind: draft.kind,
            voting_end_timestamp: voting_end,
        };
        self.proposals.insert(
            id,
            ProposalRecord {
                id,
                proposer: proposer.clone(),
                title: draft.title,
                description: draft.description,
                kind: draft.kind,
                action: draft.action,
                status: ProposalStatus::Active,
                votes_for: 0,
                votes_against: 0,
                voter_count: 0,
                proposer_power: have,
                min_voting_power_required: params.quorum_votes,
                created_at: now,
                voting_end,
                execution_time,
                finalized_at: None,
                executed_at: None,
                executed_by: None,
            },
        );
        self.next_proposal_id = next;
        Ok(Outcome::with_event(id, event))
    }

    /// Cast one ballot with the voter's current power as a snapshot.
    ///
    /// A ballot at exactly `voting_end` is accepted. Returns the power counted.
    pub fn vote(
        &mut self,
        ledger: &mut VoteLedger,
        voter: &Address,
        proposal_id: ProposalId,
        support: bool,
        now: Timestamp,
        power: &dyn VotingPower,
    ) -> Result<Outcome<u128>, GovernanceError> {
        let proposal = self
            .proposals
            .get(&proposal_id)
            .ok_or(GovernanceError::InvalidProposalId(proposal_id))?;
        if !proposal.status.is_voting() {
            return Err(GovernanceError::ProposalNotActive {
                proposal_id,
                status: proposal.status,
            });
        }
        if now > proposal.voting_end {
            return Err(GovernanceError::ProposalExpired {
                proposal_id,
                voting_end: proposal.voting_end,
            });
        }
        if ledger.has_voted(proposal_id, voter) {
            return Err(GovernanceError::AlreadyVoted {
                voter: voter.clone(),
                proposal_id,
            });
        }
        let voting_power = power.voting_power_of(voter);
        if voting_power == 0 {
            return Err(GovernanceError::InvalidVotingPower(voter.clone()));
        }
        let (votes_for, votes_against) = if support {
            (
                proposal
                    .votes_for
                    .checked_add(voting_power)
                    .ok_or(GovernanceError::Overflow)?,
                proposal.votes_against,
            )
        } else {
            (
                proposal.votes_for,
                proposal
                    .votes_against
                    .checked_add(voting_power)
                    .ok_or(GovernanceError::Overflow)?,
            )
        };
        votes_for
            .checked_add(votes_against)
            .ok_or(GovernanceError::Overflow)?;

        ledger.record(VoteRecord {
            proposal_id,
            voter: voter.clone(),
            support,
            voting_power,
            cast_at: now,
        })?;
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::InvalidProposalId(proposal_id))?;
        proposal.votes_for = votes_for;
        proposal.votes_against = votes_against;
        proposal.voter_count = proposal.voter_count.saturating_add(1);

        Ok(Outcome::with_event(
            voting_power,
            DomainEvent::VoteSubmitted {
                proposal_id,
                voter: voter.clone(),
                vote: support,
                voting_power,
            },
        ))
    }

    /// Close voting and settle the outcome. Irreversible.
    pub fn finalize(
        &mut self,
        proposal_id: ProposalId,
        now: Timestamp,
    ) -> Result<Outcome<ProposalStatus>, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::InvalidProposalId(proposal_id))?;
        let status = proposal.tally_outcome();
        if !proposal.status.can_transition_to(status) {
            return Err(GovernanceError::ProposalNotActive {
                proposal_id,
                status: proposal.status,
            });
        }
        if now < proposal.voting_end {
            return Err(GovernanceError::VotingStillOpen {
                proposal_id,
                voting_end: proposal.voting_end,
            });
        }
        proposal.status = status;
        proposal.finalized_at = Some(now);

        Ok(Outcome::with_event(
            status,
            DomainEvent::ProposalFinalized {
                proposal_id,
                status,
                votes_for: proposal.votes_for,
                votes_against: proposal.votes_against,
                timestamp: now,
            },
        ))
    }

    pub fn get(&self, proposal_id: ProposalId) -> Option<&ProposalRecord> {
        self.proposals.get(&proposal_id)
    }

    pub(crate) fn get_mut(&mut self, proposal_id: ProposalId) -> Option<&mut ProposalRecord> {
        self.proposals.get_mut(&proposal_id)
    }

    /// Proposals in id order, optionally filtered by status.
    pub fn list(&self, status: Option<ProposalStatus>) -> Vec<&ProposalRecord> {
        self.proposals
            .values()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect()
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::new()
    }
}
