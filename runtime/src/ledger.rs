//! The ledger: every component's state, advanced only by submitted transactions.

use crate::call::{Receipt, Transaction};
use crate::error::RuntimeError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vesta_governance::params::validate_all;
use vesta_governance::{ProposalRegistry, VoteLedger};
use vesta_rbac::AdminRegistry;
use vesta_staking::StakePool;
use vesta_types::{Address, GovernanceParameters, Outcome, Role, StakeId, Timestamp};

/// Bumped whenever the serialized layout of [`Ledger`] changes.
pub const SNAPSHOT_FORMAT: u32 = 1;

/// All component state of one Vesta instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    pub(crate) pool: StakePool,
    pub(crate) proposals: ProposalRegistry,
    pub(crate) votes: VoteLedger,
    pub(crate) admins: AdminRegistry,
    pub(crate) params: GovernanceParameters,
}

impl Ledger {
    /// Build the initial state.
    ///
    /// `params` is range-checked. The first address in `super_admins` is
    /// bootstrapped and adds the rest, so every genesis admin shows up in the
    /// returned events.
    pub fn genesis(
        params: GovernanceParameters,
        super_admins: &[Address],
        now: Timestamp,
    ) -> Result<Outcome<Self>, RuntimeError> {
        validate_all(&params)?;
        let (first, rest) = super_admins.split_first().ok_or(RuntimeError::NoSuperAdmin)?;

        let mut admins = AdminRegistry::new();
        let mut events = admins.bootstrap(first, now)?.events;
        for address in rest {
            events.extend(admins.add_admin(first, address, Role::SuperAdmin, now)?.events);
        }
        info!(
            super_admins = super_admins.len(),
            params_version = params.version,
            "genesis ledger created"
        );
        Ok(Outcome::new(
            Self {
                pool: StakePool::new(),
                proposals: ProposalRegistry::new(),
                votes: VoteLedger::new(),
                admins,
                params,
            },
            events,
        ))
    }

    /// Apply every call of `tx` in order against a working copy, committing
    /// only if all of them succeed.
    ///
    /// On failure the ledger is untouched and the error names the failing call.
    pub fn submit(&mut self, tx: &Transaction, now: Timestamp) -> Result<Receipt, RuntimeError> {
        if tx.calls.is_empty() {
            return Err(RuntimeError::EmptyTransaction);
        }
        let mut working = self.clone();
        let mut returns = Vec::with_capacity(tx.calls.len());
        let mut events = Vec::new();

        for (index, call) in tx.calls.iter().enumerate() {
            debug!(index, target = %call.target, sender = %tx.sender, "dispatching call");
            match working.apply_call(&tx.sender, call, now) {
                Ok(outcome) => {
                    returns.push(outcome.value);
                    events.extend(outcome.events);
                }
                Err(source) => {
                    warn!(
                        index,
                        target = %call.target,
                        sender = %tx.sender,
                        error = %source,
                        "transaction rolled back"
                    );
                    return Err(RuntimeError::CallFailed {
                        index,
                        target: call.target.clone(),
                        source: Box::new(source),
                    });
                }
            }
        }

        *self = working;
        info!(
            sender = %tx.sender,
            calls = tx.calls.len(),
            events = events.len(),
            "transaction accepted"
        );
        Ok(Receipt {
            sender: tx.sender.clone(),
            timestamp: now,
            returns,
            events,
        })
    }

    pub fn params(&self) -> &GovernanceParameters {
        &self.params
    }

    pub fn pool(&self) -> &StakePool {
        &self.pool
    }

    pub fn proposals(&self) -> &ProposalRegistry {
        &self.proposals
    }

    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    pub fn admins(&self) -> &AdminRegistry {
        &self.admins
    }

    /// Rewards owed on a stake at `now`, without settling them.
    pub fn pending_rewards(&self, stake_id: StakeId, now: Timestamp) -> Result<u128, RuntimeError> {
        Ok(self.pool.pending_rewards(stake_id, now, &self.params)?)
    }

    /// Serialize the whole ledger with bincode, prefixed by [`SNAPSHOT_FORMAT`].
    pub fn save_state(&self) -> Result<Vec<u8>, RuntimeError> {
        bincode::serialize(&(SNAPSHOT_FORMAT, self)).map_err(|e| RuntimeError::Snapshot(e.to_string()))
    }

    pub fn load_state(bytes: &[u8]) -> Result<Self, RuntimeError> {
        let (format, ledger): (u32, Ledger) =
            bincode::deserialize(bytes).map_err(|e| RuntimeError::Snapshot(e.to_string()))?;
        if format != SNAPSHOT_FORMAT {
            return Err(RuntimeError::Snapshot(format!(
                "unsupported snapshot format {format}, expected {SNAPSHOT_FORMAT}"
            )));
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{Call, CallReturn};
    use serde_json::json;

    fn addr(n: u8) -> Address {
        Address::new(format!("0x{:040x}", n))
    }

    fn genesis() -> Ledger {
        Ledger::genesis(GovernanceParameters::genesis(), &[addr(1)], Timestamp::new(0))
            .unwrap()
            .value
    }

    #[test]
    fn test_genesis_requires_super_admin() {
        assert_eq!(
            Ledger::genesis(GovernanceParameters::genesis(), &[], Timestamp::new(0)).unwrap_err(),
            RuntimeError::NoSuperAdmin
        );
    }

    #[test]
    fn test_genesis_rejects_out_of_range_params() {
        let params = GovernanceParameters {
            taker_fee_bps: 5_000,
            ..GovernanceParameters::genesis()
        };
        assert!(matches!(
            Ledger::genesis(params, &[addr(1)], Timestamp::new(0)).unwrap_err(),
            RuntimeError::Governance(_)
        ));
    }

    #[test]
    fn test_genesis_seeds_every_super_admin() {
        let out = Ledger::genesis(
            GovernanceParameters::genesis(),
            &[addr(1), addr(2)],
            Timestamp::new(0),
        )
        .unwrap();
        assert_eq!(out.value.admins().super_admin_count(), 2);
        assert_eq!(out.events.len(), 2);
    }

    #[test]
    fn test_empty_transaction_rejected() {
        let mut ledger = genesis();
        let tx = Transaction::new(addr(2), vec![]);
        assert_eq!(
            ledger.submit(&tx, Timestamp::new(1)).unwrap_err(),
            RuntimeError::EmptyTransaction
        );
    }

    #[test]
    fn test_snapshot_restores_state() {
        let mut ledger = genesis();
        let tx = Transaction::single(addr(2), Call::new("staking::stake", vec![json!("5000")]));
        let receipt = ledger.submit(&tx, Timestamp::new(10)).unwrap();
        assert_eq!(receipt.returns, vec![CallReturn::StakeId(1)]);

        let bytes = ledger.save_state().unwrap();
        let restored = Ledger::load_state(&bytes).unwrap();
        assert_eq!(restored.pool().total_staked(), 5_000);
        assert_eq!(restored.pool().stake_of(&addr(2)).unwrap().id, 1);
        assert_eq!(restored.params(), ledger.params());
        assert_eq!(restored.admins().len(), 1);
    }

    #[test]
    fn test_snapshot_format_checked() {
        let bytes = bincode::serialize(&(SNAPSHOT_FORMAT + 1, &genesis())).unwrap();
        assert!(matches!(
            Ledger::load_state(&bytes).unwrap_err(),
            RuntimeError::Snapshot(_)
        ));
        assert!(Ledger::load_state(&[1, 2, 3]).is_err());
    }
}
