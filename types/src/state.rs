//! Proposal lifecycle enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// What category of change a proposal carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalKind {
    /// A protocol parameter or admin role change.
    Parameter,
    /// A feature flag toggle.
    Feature,
    /// Any change; skips the execution delay once passed.
    Emergency,
}

impl ProposalKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Feature => "feature",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProposalKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parameter" => Ok(Self::Parameter),
            "feature" => Ok(Self::Feature),
            "emergency" => Ok(Self::Emergency),
            other => Err(TypesError::UnknownProposalKind(other.to_string())),
        }
    }
}

/// Lifecycle status of a proposal.
///
/// `Pending` exists for completeness and does not accept votes; proposals
/// enter `Active` on creation.
/// Legal transitions: `Active -> Passed | Rejected`, `Passed -> Executed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Active,
    Passed,
    Rejected,
    Executed,
}

impl ProposalStatus {
    /// Whether this status accepts votes.
    pub fn is_voting(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Active, Self::Passed)
                | (Self::Active, Self::Rejected)
                | (Self::Passed, Self::Executed)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
