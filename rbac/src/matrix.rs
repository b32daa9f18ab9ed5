//! The fixed role → permission matrix.

use std::collections::BTreeSet;
use vesta_types::{Permission, Role};

/// Permissions granted to a freshly assigned `role`.
pub fn default_permissions(role: Role) -> BTreeSet<Permission> {
    use Permission::*;
    match role {
        Role::User => [ViewDashboard, ViewAnalytics].into_iter().collect(),
        Role::Admin => [
            ViewDashboard,
            ViewAnalytics,
            ManageUsers,
            ManageGreetings,
            ExecuteFunctions,
        ]
        .into_iter()
        .collect(),
        Role::SuperAdmin => Permission::ALL.into_iter().collect(),
    }
}
