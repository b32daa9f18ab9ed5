//! Errors for malformed primitive values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    #[error("unknown proposal kind: {0}")]
    UnknownProposalKind(String),
}
