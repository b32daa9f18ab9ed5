//! Admin registry: owns every privileged identity.

use crate::error::AdminError;
use crate::matrix::default_permissions;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use vesta_types::{Address, DomainEvent, Outcome, Permission, Role, Timestamp};

/// A registered identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub address: Address,
    pub role: Role,
    /// Explicit permission set. Ignored for `SuperAdmin`, which holds everything.
    pub permissions: BTreeSet<Permission>,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl AdminUser {
    pub fn new(address: Address, role: Role, now: Timestamp) -> Self {
        Self {
            address,
            role,
            permissions: default_permissions(role),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role == Role::SuperAdmin || self.permissions.contains(&permission)
    }
}

/// Registry of privileged identities keyed by address.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdminRegistry {
    admins: BTreeMap<Address, AdminUser>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self {
            admins: BTreeMap::new(),
        }
    }

    /// Seed the first super admin. Only allowed while no super admin exists.
    pub fn bootstrap(
        &mut self,
        address: &Address,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        if self.super_admin_count() > 0 {
            return Err(AdminError::AlreadyBootstrapped);
        }
        self.admins.insert(
            address.clone(),
            AdminUser::new(address.clone(), Role::SuperAdmin, now),
        );
        Ok(Outcome::with_event(
            (),
            DomainEvent::AdminAdded {
                actor: None,
                address: address.clone(),
                role: Role::SuperAdmin,
                timestamp: now,
            },
        ))
    }

    /// `super_admin` passes every check; everyone else needs explicit membership.
    /// Unregistered addresses hold nothing.
    pub fn has_permission(&self, address: &Address, permission: Permission) -> bool {
        self.admins
            .get(address)
            .map(|a| a.has_permission(permission))
            .unwrap_or(false)
    }

    /// Fail with `Unauthorized` unless `actor` holds `permission`.
    pub fn require(&self, actor: &Address, permission: Permission) -> Result<(), AdminError> {
        if self.has_permission(actor, permission) {
            Ok(())
        } else {
            Err(AdminError::Unauthorized {
                actor: actor.clone(),
                permission,
            })
        }
    }

    pub fn add_admin(
        &mut self,
        actor: &Address,
        address: &Address,
        role: Role,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.require(actor, Permission::ManageAdmins)?;
        if self.admins.contains_key(address) {
            return Err(AdminError::AlreadyExists(address.clone()));
        }
        self.admins
            .insert(address.clone(), AdminUser::new(address.clone(), role, now));
        self.touch(actor, now);
        Ok(Outcome::with_event(
            (),
            DomainEvent::AdminAdded {
                actor: Some(actor.clone()),
                address: address.clone(),
                role,
                timestamp: now,
            },
        ))
    }

    pub fn remove_admin(
        &mut self,
        actor: &Address,
        address: &Address,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.require(actor, Permission::ManageAdmins)?;
        let outcome = self.remove_unchecked(Some(actor), address, now)?;
        self.touch(actor, now);
        Ok(outcome)
    }

    /// Change a role and reset the explicit permission set to the role's defaults.
    pub fn update_admin_role(
        &mut self,
        actor: &Address,
        address: &Address,
        new_role: Role,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.require(actor, Permission::ManageAdmins)?;
        let outcome = self.set_role_unchecked(Some(actor), address, new_role, now)?;
        self.touch(actor, now);
        Ok(outcome)
    }

    pub fn grant_permission(
        &mut self,
        actor: &Address,
        address: &Address,
        permission: Permission,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.set_permission(actor, address, permission, true, now)
    }

    pub fn revoke_permission(
        &mut self,
        actor: &Address,
        address: &Address,
        permission: Permission,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.set_permission(actor, address, permission, false, now)
    }

    /// Apply a role change decided by a passed proposal.
    ///
    /// No actor permission is checked, but the last-super-admin guard still
    /// applies. `None` removes the identity; an unknown address is added.
    pub fn apply_governance_change(
        &mut self,
        address: &Address,
        role: Option<Role>,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        match role {
            None => self.remove_unchecked(None, address, now),
            Some(role) if self.admins.contains_key(address) => {
                self.set_role_unchecked(None, address, role, now)
            }
            Some(role) => {
                self.admins
                    .insert(address.clone(), AdminUser::new(address.clone(), role, now));
                Ok(Outcome::with_event(
                    (),
                    DomainEvent::AdminAdded {
                        actor: None,
                        address: address.clone(),
                        role,
                        timestamp: now,
                    },
                ))
            }
        }
    }

    /// Whether a role change for `address` could be applied right now.
    pub fn check_governance_change(
        &self,
        address: &Address,
        role: Option<Role>,
    ) -> Result<(), AdminError> {
        match (self.admins.get(address), role) {
            (None, None) => Err(AdminError::NotFound(address.clone())),
            (None, Some(_)) => Ok(()),
            (Some(user), new_role) => self.guard_last_super_admin(user, new_role),
        }
    }

    pub fn get(&self, address: &Address) -> Option<&AdminUser> {
        self.admins.get(address)
    }

    pub fn list(&self) -> impl Iterator<Item = &AdminUser> {
        self.admins.values()
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }

    pub fn super_admin_count(&self) -> usize {
        self.admins
            .values()
            .filter(|a| a.role == Role::SuperAdmin)
            .count()
    }

    fn remove_unchecked(
        &mut self,
        actor: Option<&Address>,
        address: &Address,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        let user = self
            .admins
            .get(address)
            .ok_or_else(|| AdminError::NotFound(address.clone()))?;
        self.guard_last_super_admin(user, None)?;
        self.admins.remove(address);
        Ok(Outcome::with_event(
            (),
            DomainEvent::AdminRemoved {
                actor: actor.cloned(),
                address: address.clone(),
                timestamp: now,
            },
        ))
    }

    fn set_role_unchecked(
        &mut self,
        actor: Option<&Address>,
        address: &Address,
        new_role: Role,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        let user = self
            .admins
            .get(address)
            .ok_or_else(|| AdminError::NotFound(address.clone()))?;
        self.guard_last_super_admin(user, Some(new_role))?;
        let old_role = user.role;

        if let Some(user) = self.admins.get_mut(address) {
            user.role = new_role;
            user.permissions = default_permissions(new_role);
        }
        Ok(Outcome::with_event(
            (),
            DomainEvent::AdminRoleUpdated {
                actor: actor.cloned(),
                address: address.clone(),
                old_role,
                new_role,
                timestamp: now,
            },
        ))
    }

    fn set_permission(
        &mut self,
        actor: &Address,
        address: &Address,
        permission: Permission,
        granted: bool,
        now: Timestamp,
    ) -> Result<Outcome<()>, AdminError> {
        self.require(actor, Permission::ManageAdmins)?;
        let user = self
            .admins
            .get_mut(address)
            .ok_or_else(|| AdminError::NotFound(address.clone()))?;
        if granted {
            user.permissions.insert(permission);
        } else {
            user.permissions.remove(&permission);
        }
        self.touch(actor, now);
        Ok(Outcome::with_event(
            (),
            DomainEvent::PermissionChanged {
                actor: actor.clone(),
                address: address.clone(),
                permission,
                granted,
                timestamp: now,
            },
        ))
    }

    /// Refuse to remove (`None`) or demote the only remaining super admin.
    fn guard_last_super_admin(
        &self,
        user: &AdminUser,
        new_role: Option<Role>,
    ) -> Result<(), AdminError> {
        let stays_super = new_role == Some(Role::SuperAdmin);
        if user.role == Role::SuperAdmin && !stays_super && self.super_admin_count() <= 1 {
            return Err(AdminError::CannotRemoveLastSuperAdmin(user.address.clone()));
        }
        Ok(())
    }

    fn touch(&mut self, address: &Address, now: Timestamp) {
        if let Some(user) = self.admins.get_mut(address) {
            user.last_activity = user.last_activity.max(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new(format!("0x{:040x}", n))
    }

    fn ts(millis: u64) -> Timestamp {
        Timestamp::new(millis)
    }

    fn bootstrapped() -> AdminRegistry {
        let mut reg = AdminRegistry::new();
        reg.bootstrap(&addr(1), ts(0)).unwrap();
        reg
    }

    #[test]
    fn test_bootstrap_only_once() {
        let mut reg = bootstrapped();
        assert_eq!(reg.super_admin_count(), 1);
        assert_eq!(
            reg.bootstrap(&addr(2), ts(1)).unwrap_err(),
            AdminError::AlreadyBootstrapped
        );
    }

    #[test]
    fn test_super_admin_passes_every_check() {
        let mut reg = bootstrapped();
        reg.admins
            .get_mut(&addr(1))
            .unwrap()
            .permissions
            .clear();
        for p in Permission::ALL {
            assert!(reg.has_permission(&addr(1), p));
        }
    }

    #[test]
    fn test_add_admin_requires_manage_admins() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::Admin, ts(5)).unwrap();
        let err = reg
            .add_admin(&addr(2), &addr(3), Role::User, ts(6))
            .unwrap_err();
        assert_eq!(
            err,
            AdminError::Unauthorized {
                actor: addr(2),
                permission: Permission::ManageAdmins
            }
        );
        assert!(reg.get(&addr(3)).is_none());
        assert_eq!(reg.get(&addr(1)).unwrap().last_activity, ts(5));
    }

    #[test]
    fn test_unregistered_actor_is_unauthorized() {
        let mut reg = bootstrapped();
        assert!(matches!(
            reg.add_admin(&addr(9), &addr(3), Role::User, ts(1)),
            Err(AdminError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::User, ts(1)).unwrap();
        assert_eq!(
            reg.add_admin(&addr(1), &addr(2), Role::Admin, ts(2))
                .unwrap_err(),
            AdminError::AlreadyExists(addr(2))
        );
        assert_eq!(reg.get(&addr(2)).unwrap().role, Role::User);
    }

    #[test]
    fn test_admin_permissions_follow_matrix() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::Admin, ts(1)).unwrap();
        reg.add_admin(&addr(1), &addr(3), Role::User, ts(1)).unwrap();
        assert!(reg.has_permission(&addr(2), Permission::ExecuteFunctions));
        assert!(!reg.has_permission(&addr(2), Permission::ManageParams));
        assert!(reg.has_permission(&addr(3), Permission::ViewAnalytics));
        assert!(!reg.has_permission(&addr(3), Permission::ManageUsers));
    }

    #[test]
    fn test_removing_sole_super_admin_fails_and_leaves_registry_unchanged() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::Admin, ts(1)).unwrap();
        let before = reg.clone();
        let err = reg.remove_admin(&addr(1), &addr(1), ts(2)).unwrap_err();
        assert_eq!(err, AdminError::CannotRemoveLastSuperAdmin(addr(1)));
        assert_eq!(reg.admins, before.admins);
    }

    #[test]
    fn test_super_admin_removable_when_another_exists() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::SuperAdmin, ts(1))
            .unwrap();
        reg.remove_admin(&addr(2), &addr(1), ts(2)).unwrap();
        assert!(reg.get(&addr(1)).is_none());
        assert_eq!(reg.super_admin_count(), 1);
    }

    #[test]
    fn test_demoting_last_super_admin_fails() {
        let mut reg = bootstrapped();
        let err = reg
            .update_admin_role(&addr(1), &addr(1), Role::Admin, ts(1))
            .unwrap_err();
        assert_eq!(err, AdminError::CannotRemoveLastSuperAdmin(addr(1)));
        assert_eq!(reg.get(&addr(1)).unwrap().role, Role::SuperAdmin);
    }

    #[test]
    fn test_role_update_resets_permissions() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::User, ts(1)).unwrap();
        reg.grant_permission(&addr(1), &addr(2), Permission::ManageParams, ts(2))
            .unwrap();
        assert!(reg.has_permission(&addr(2), Permission::ManageParams));

        let out = reg
            .update_admin_role(&addr(1), &addr(2), Role::Admin, ts(3))
            .unwrap();
        assert_eq!(
            out.events,
            vec![DomainEvent::AdminRoleUpdated {
                actor: Some(addr(1)),
                address: addr(2),
                old_role: Role::User,
                new_role: Role::Admin,
                timestamp: ts(3),
            }]
        );
        assert!(!reg.has_permission(&addr(2), Permission::ManageParams));
        assert!(reg.has_permission(&addr(2), Permission::ManageUsers));
    }

    #[test]
    fn test_revoke_permission() {
        let mut reg = bootstrapped();
        reg.add_admin(&addr(1), &addr(2), Role::Admin, ts(1)).unwrap();
        reg.revoke_permission(&addr(1), &addr(2), Permission::ManageUsers, ts(2))
            .unwrap();
        assert!(!reg.has_permission(&addr(2), Permission::ManageUsers));
        assert!(reg.has_permission(&addr(2), Permission::ManageGreetings));
    }

    #[test]
    fn test_governance_change_skips_actor_check_but_keeps_guard() {
        let mut reg = bootstrapped();
        reg.apply_governance_change(&addr(5), Some(Role::Admin), ts(1))
            .unwrap();
        assert_eq!(reg.get(&addr(5)).unwrap().role, Role::Admin);

        reg.apply_governance_change(&addr(5), Some(Role::SuperAdmin), ts(2))
            .unwrap();
        reg.apply_governance_change(&addr(1), None, ts(3)).unwrap();
        assert_eq!(
            reg.apply_governance_change(&addr(5), None, ts(4))
                .unwrap_err(),
            AdminError::CannotRemoveLastSuperAdmin(addr(5))
        );
        assert_eq!(
            reg.check_governance_change(&addr(9), None).unwrap_err(),
            AdminError::NotFound(addr(9))
        );
    }
}
