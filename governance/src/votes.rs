//! Append-only ballot ledger.
//!
//! The existence of a record is the double-vote guard: a ballot is never
//! mutated or removed once written.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vesta_types::{Address, ProposalId, Timestamp};

/// One voter's ballot on one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub proposal_id: ProposalId,
    pub voter: Address,
    /// `true` for, `false` against.
    pub support: bool,
    /// Voting power snapshot at cast time.
    pub voting_power: u128,
    pub cast_at: Timestamp,
}

/// Every ballot, keyed by proposal then voter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: BTreeMap<ProposalId, BTreeMap<Address, VoteRecord>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self {
            votes: BTreeMap::new(),
        }
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &Address) -> bool {
        self.get_vote(proposal_id, voter).is_some()
    }

    pub fn get_vote(&self, proposal_id: ProposalId, voter: &Address) -> Option<&VoteRecord> {
        self.votes.get(&proposal_id).and_then(|m| m.get(voter))
    }

    /// All ballots on a proposal, ordered by voter address.
    pub fn votes_for_proposal(&self, proposal_id: ProposalId) -> Vec<&VoteRecord> {
        self.votes
            .get(&proposal_id)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.votes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a ballot. Fails with `AlreadyVoted` if one exists for the pair.
    pub(crate) fn record(&mut self, vote: VoteRecord) -> Result<(), GovernanceError> {
        let ballots = self.votes.entry(vote.proposal_id).or_default();
        if ballots.contains_key(&vote.voter) {
            return Err(GovernanceError::AlreadyVoted {
                voter: vote.voter,
                proposal_id: vote.proposal_id,
            });
        }
        ballots.insert(vote.voter.clone(), vote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(proposal_id: ProposalId, voter: u8, support: bool) -> VoteRecord {
        VoteRecord {
            proposal_id,
            voter: Address::new(format!("0x{:040x}", voter)),
            support,
            voting_power: 10,
            cast_at: Timestamp::new(1),
        }
    }

    #[test]
    fn second_ballot_for_same_pair_rejected() {
        let mut ledger = VoteLedger::new();
        ledger.record(ballot(1, 1, true)).unwrap();
        let err = ledger.record(ballot(1, 1, false)).unwrap_err();
        assert!(matches!(err, GovernanceError::AlreadyVoted { proposal_id: 1, .. }));
        let kept = ledger
            .get_vote(1, &Address::new(format!("0x{:040x}", 1)))
            .unwrap();
        assert!(kept.support, "original ballot is untouched");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn same_voter_may_vote_on_different_proposals() {
        let mut ledger = VoteLedger::new();
        ledger.record(ballot(1, 1, true)).unwrap();
        ledger.record(ballot(2, 1, false)).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.votes_for_proposal(1).len(), 1);
        assert!(ledger.votes_for_proposal(3).is_empty());
    }
}
