use thiserror::Error;
use vesta_rbac::AdminError;
use vesta_types::{Address, ProposalId, ProposalStatus, Timestamp};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("insufficient stake to propose: have {have}, need {need}")]
    InsufficientStake { have: u128, need: u128 },

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("proposal {0} not found")]
    InvalidProposalId(ProposalId),

    #[error("proposal {proposal_id} is {status}, not active")]
    ProposalNotActive {
        proposal_id: ProposalId,
        status: ProposalStatus,
    },

    #[error("voting on proposal {proposal_id} closed at {voting_end}")]
    ProposalExpired {
        proposal_id: ProposalId,
        voting_end: Timestamp,
    },

    #[error("voting on proposal {proposal_id} is open until {voting_end}")]
    VotingStillOpen {
        proposal_id: ProposalId,
        voting_end: Timestamp,
    },

    #[error("{voter} has already voted on proposal {proposal_id}")]
    AlreadyVoted {
        voter: Address,
        proposal_id: ProposalId,
    },

    #[error("{0} has no voting power")]
    InvalidVotingPower(Address),

    #[error("proposal {proposal_id} is {status}, not passed")]
    ProposalNotPassed {
        proposal_id: ProposalId,
        status: ProposalStatus,
    },

    #[error("proposal {proposal_id} is timelocked until {executable_at}")]
    TimelockActive {
        proposal_id: ProposalId,
        executable_at: Timestamp,
    },

    #[error("{param} = {value} out of range: {reason}")]
    ParameterOutOfRange {
        param: &'static str,
        value: u128,
        reason: &'static str,
    },

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("arithmetic overflow in governance accounting")]
    Overflow,
}
