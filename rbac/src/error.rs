use thiserror::Error;
use vesta_types::{Address, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("{actor} lacks permission {permission}")]
    Unauthorized {
        actor: Address,
        permission: Permission,
    },

    #[error("{0} is already registered")]
    AlreadyExists(Address),

    #[error("{0} is not registered")]
    NotFound(Address),

    #[error("cannot remove or demote the last super admin {0}")]
    CannotRemoveLastSuperAdmin(Address),

    #[error("registry already has a super admin")]
    AlreadyBootstrapped,
}
