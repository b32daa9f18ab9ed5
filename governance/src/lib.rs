//! Stake-weighted governance for the Vesta core.
//!
//! Lifecycle: `Active → {Passed | Rejected} → Executed`.
//! - A proposal is `Active` as soon as it is created by a holder of the proposer threshold.
//! - Voting power is a snapshot of staked principal at cast time; one ballot per voter.
//! - Finalize after the voting window: passes iff `for > against` and `for + against >= quorum`.
//! - Execute after the timelock (emergency proposals skip the delay, never the vote).
//!
//! All governable parameters are range-checked when proposed and again when executed.

pub mod engine;
pub mod error;
pub mod params;
pub mod power;
pub mod proposal;
pub mod registry;
pub mod votes;

pub use engine::ExecutionEngine;
pub use error::GovernanceError;
pub use params::GovernableParam;
pub use power::VotingPower;
pub use proposal::{ProposalAction, ProposalDraft, ProposalRecord};
pub use registry::ProposalRegistry;
pub use votes::{VoteLedger, VoteRecord};
