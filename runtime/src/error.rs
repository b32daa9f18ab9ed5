//! Errors surfaced at the transaction boundary.

use thiserror::Error;
use vesta_governance::GovernanceError;
use vesta_rbac::AdminError;
use vesta_staking::StakingError;
use vesta_types::TypesError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("staking: {0}")]
    Staking(#[from] StakingError),

    #[error("governance: {0}")]
    Governance(#[from] GovernanceError),

    #[error("admin: {0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Types(#[from] TypesError),

    #[error("unknown call target {0:?}")]
    UnknownTarget(String),

    #[error("{target} takes {expected} argument(s), got {got}")]
    ArgumentCount {
        target: String,
        expected: usize,
        got: usize,
    },

    #[error("argument {index} of {target}: {reason}")]
    InvalidArgument {
        target: String,
        index: usize,
        reason: String,
    },

    #[error("transaction has no calls")]
    EmptyTransaction,

    /// A bundle was rolled back because one of its calls failed.
    #[error("call {index} ({target}) failed: {source}")]
    CallFailed {
        index: usize,
        target: String,
        #[source]
        source: Box<RuntimeError>,
    },

    #[error("genesis needs at least one super admin")]
    NoSuperAdmin,

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl RuntimeError {
    /// The error that caused a rolled-back bundle, or `self` otherwise.
    pub fn root(&self) -> &RuntimeError {
        match self {
            Self::CallFailed { source, .. } => source.root(),
            other => other,
        }
    }
}
