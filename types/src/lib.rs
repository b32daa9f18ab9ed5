//! Fundamental types for the Vesta staking and governance core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, timestamps, identifiers, governance parameters, role and status enums,
//! and the domain events returned by every state transition.

pub mod address;
pub mod error;
pub mod event;
pub mod params;
pub mod role;
pub mod state;
pub mod time;

pub use address::Address;
pub use error::TypesError;
pub use event::{DomainEvent, Outcome};
pub use params::GovernanceParameters;
pub use role::{Permission, Role};
pub use state::{ProposalKind, ProposalStatus};
pub use time::Timestamp;

/// Identifier of a stake record, assigned by the stake pool on creation.
pub type StakeId = u64;

/// Identifier of a proposal, assigned sequentially by the proposal registry.
pub type ProposalId = u64;

/// One basis point is 1/100 of a percent; 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;
