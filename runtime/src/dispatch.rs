//! Routes a `module::function` target to the owning component.

use crate::call::{Call, CallReturn};
use crate::error::RuntimeError;
use crate::ledger::Ledger;
use vesta_governance::{ExecutionEngine, ProposalAction, ProposalDraft};
use vesta_staking::Unstaked;
use vesta_types::{Address, Outcome, Permission, ProposalKind, Role, Timestamp};

/// Every target the runtime accepts, with its positional parameters.
pub const TARGETS: &[(&str, &[&str])] = &[
    ("staking::stake", &["amount"]),
    ("staking::unstake", &["stake_id"]),
    ("staking::withdraw", &["stake_id", "amount"]),
    ("staking::claim_rewards", &["stake_id"]),
    (
        "governance::create_proposal",
        &["title", "description", "kind", "action"],
    ),
    ("governance::vote", &["proposal_id", "support"]),
    ("governance::finalize", &["proposal_id"]),
    ("governance::execute", &["proposal_id"]),
    ("admin::add_admin", &["address", "role"]),
    ("admin::remove_admin", &["address"]),
    ("admin::update_admin_role", &["address", "role"]),
    ("admin::grant_permission", &["address", "permission"]),
    ("admin::revoke_permission", &["address", "permission"]),
];

fn released(u: Unstaked) -> CallReturn {
    CallReturn::Released {
        principal: u.principal,
        rewards: u.rewards,
    }
}

impl Ledger {
    /// Apply one call as `sender`. Mutates `self` only on success.
    pub(crate) fn apply_call(
        &mut self,
        sender: &Address,
        call: &Call,
        now: Timestamp,
    ) -> Result<Outcome<CallReturn>, RuntimeError> {
        let arity = TARGETS
            .iter()
            .find(|(target, _)| *target == call.target)
            .map(|(_, params)| params.len())
            .ok_or_else(|| RuntimeError::UnknownTarget(call.target.clone()))?;
        call.expect_args(arity)?;

        let outcome = match call.target.as_str() {
            "staking::stake" => self
                .pool
                .stake(sender, call.u128_arg(0)?, now, &self.params)?
                .map(CallReturn::StakeId),
            "staking::unstake" => self
                .pool
                .unstake(sender, call.u64_arg(0)?, now, &self.params)?
                .map(released),
            "staking::withdraw" => self
                .pool
                .withdraw(sender, call.u64_arg(0)?, call.u128_arg(1)?, now, &self.params)?
                .map(released),
            "staking::claim_rewards" => self
                .pool
                .claim_rewards(sender, call.u64_arg(0)?, now, &self.params)?
                .map(CallReturn::Rewards),

            "governance::create_proposal" => {
                let draft = ProposalDraft {
                    title: call.str_arg(0)?.to_string(),
                    description: call.str_arg(1)?.to_string(),
                    kind: call.parsed_arg::<ProposalKind>(2)?,
                    action: call.json_arg::<ProposalAction>(3)?,
                };
                self.proposals
                    .create(sender, draft, now, &self.pool, &self.params, &self.admins)?
                    .map(CallReturn::ProposalId)
            }
            "governance::vote" => self
                .proposals
                .vote(
                    &mut self.votes,
                    sender,
                    call.u64_arg(0)?,
                    call.bool_arg(1)?,
                    now,
                    &self.pool,
                )?
                .map(CallReturn::VotingPower),
            "governance::finalize" => self
                .proposals
                .finalize(call.u64_arg(0)?, now)?
                .map(CallReturn::Status),
            "governance::execute" => ExecutionEngine
                .execute(
                    &mut self.proposals,
                    &mut self.params,
                    &mut self.admins,
                    call.u64_arg(0)?,
                    sender,
                    now,
                )?
                .map(|()| CallReturn::Unit),

            "admin::add_admin" => self
                .admins
                .add_admin(
                    sender,
                    &call.address_arg(0)?,
                    call.parsed_arg::<Role>(1)?,
                    now,
                )?
                .map(|()| CallReturn::Unit),
            "admin::remove_admin" => self
                .admins
                .remove_admin(sender, &call.address_arg(0)?, now)?
                .map(|()| CallReturn::Unit),
            "admin::update_admin_role" => self
                .admins
                .update_admin_role(
                    sender,
                    &call.address_arg(0)?,
                    call.parsed_arg::<Role>(1)?,
                    now,
                )?
                .map(|()| CallReturn::Unit),
            "admin::grant_permission" => self
                .admins
                .grant_permission(
                    sender,
                    &call.address_arg(0)?,
                    call.parsed_arg::<Permission>(1)?,
                    now,
                )?
                .map(|()| CallReturn::Unit),
            "admin::revoke_permission" => self
                .admins
                .revoke_permission(
                    sender,
                    &call.address_arg(0)?,
                    call.parsed_arg::<Permission>(1)?,
                    now,
                )?
                .map(|()| CallReturn::Unit),

            other => return Err(RuntimeError::UnknownTarget(other.to_string())),
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vesta_types::GovernanceParameters;

    fn addr(n: u8) -> Address {
        Address::new(format!("0x{:040x}", n))
    }

    fn ledger() -> Ledger {
        Ledger::genesis(GovernanceParameters::genesis(), &[addr(1)], Timestamp::new(0))
            .unwrap()
            .value
    }

    #[test]
    fn test_unknown_target() {
        let mut l = ledger();
        let err = l
            .apply_call(&addr(1), &Call::new("staking::mint", vec![]), Timestamp::new(1))
            .unwrap_err();
        assert_eq!(err, RuntimeError::UnknownTarget("staking::mint".into()));
    }

    #[test]
    fn test_arity_checked_before_decoding() {
        let mut l = ledger();
        let err = l
            .apply_call(
                &addr(1),
                &Call::new("governance::vote", vec![json!(1)]),
                Timestamp::new(1),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ArgumentCount {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_admin_calls_use_sender_as_actor() {
        let mut l = ledger();
        let add = Call::new("admin::add_admin", vec![json!(addr(5).as_str()), json!("admin")]);
        let err = l.apply_call(&addr(9), &add, Timestamp::new(1)).unwrap_err();
        assert!(matches!(err, RuntimeError::Admin(_)));

        l.apply_call(&addr(1), &add, Timestamp::new(1)).unwrap();
        assert_eq!(l.admins().get(&addr(5)).unwrap().role, Role::Admin);

        let grant = Call::new(
            "admin::grant_permission",
            vec![json!(addr(5).as_str()), json!("manage_params")],
        );
        l.apply_call(&addr(1), &grant, Timestamp::new(2)).unwrap();
        assert!(l.admins().has_permission(&addr(5), Permission::ManageParams));
    }

    #[test]
    fn test_unknown_role_is_types_error() {
        let mut l = ledger();
        let add = Call::new("admin::add_admin", vec![json!(addr(5).as_str()), json!("root")]);
        assert!(matches!(
            l.apply_call(&addr(1), &add, Timestamp::new(1)).unwrap_err(),
            RuntimeError::Types(_)
        ));
    }

    #[test]
    fn test_every_target_is_routed() {
        let mut l = ledger();
        for (target, params) in TARGETS {
            let args = vec![json!(null); params.len()];
            let err = l
                .apply_call(&addr(1), &Call::new(*target, args), Timestamp::new(1))
                .unwrap_err();
            assert!(
                !matches!(err, RuntimeError::UnknownTarget(_)),
                "{target} is not routed"
            );
        }
    }
}
