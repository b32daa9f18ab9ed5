//! Administrative roles and the permissions they may hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Privilege tier of a registered identity.
///
/// Ordered by privilege: `User < Admin < SuperAdmin`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(TypesError::UnknownRole(other.to_string())),
        }
    }
}

/// A single capability checked by the admin registry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewAnalytics,
    ManageUsers,
    ManageGreetings,
    ExecuteFunctions,
    ManageAdmins,
    ManageParams,
}

impl Permission {
    /// Every permission known to the core.
    pub const ALL: [Permission; 7] = [
        Self::ViewDashboard,
        Self::ViewAnalytics,
        Self::ManageUsers,
        Self::ManageGreetings,
        Self::ExecuteFunctions,
        Self::ManageAdmins,
        Self::ManageParams,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewAnalytics => "view_analytics",
            Self::ManageUsers => "manage_users",
            Self::ManageGreetings => "manage_greetings",
            Self::ExecuteFunctions => "execute_functions",
            Self::ManageAdmins => "manage_admins",
            Self::ManageParams => "manage_params",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| TypesError::UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_follows_privilege() {
        assert!(Role::User < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for p in Permission::ALL {
            assert_eq!(p.name().parse::<Permission>().unwrap(), p);
        }
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert!("root".parse::<Role>().is_err());
    }
}
