//! Governance parameters: the mutable, versioned protocol configuration.
//!
//! Created once at genesis and changed only by the execution engine after a
//! parameter or feature proposal has passed and cleared its timelock.

use crate::time::DAY_MILLIS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All protocol parameters read by the stake pool and proposal registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceParameters {
    // ── Fees ─────────────────────────────────────────────────────────────
    /// Fee charged to takers, in basis points. Range: [0, 1000].
    pub taker_fee_bps: u32,

    /// Fee charged to makers, in basis points. Range: [0, 1000].
    pub maker_fee_bps: u32,

    // ── Staking ──────────────────────────────────────────────────────────
    /// Smallest principal accepted by `stake`, in raw units.
    pub min_stake: u128,

    /// Annual simple-interest reward rate, in basis points. Range: [0, 10000].
    pub reward_rate_bps: u32,

    // ── Governance ───────────────────────────────────────────────────────
    /// Length of the voting window in milliseconds. Must be positive.
    pub voting_period_ms: u64,

    /// Timelock between the end of voting and execution, in milliseconds.
    /// Must be positive.
    pub execution_delay_ms: u64,

    /// Voting power a proposer must hold to create a proposal.
    pub min_proposer_stake: u128,

    /// Minimum total votes (for + against) for a finalize outcome to count.
    pub quorum_votes: u128,

    // ── Features ─────────────────────────────────────────────────────────
    /// Feature flags toggled by feature proposals.
    pub features: BTreeMap<String, bool>,

    /// Incremented on every applied change. Genesis is version 0.
    pub version: u64,
}

impl GovernanceParameters {
    /// Genesis defaults for a fresh deployment.
    pub fn genesis() -> Self {
        Self {
            taker_fee_bps: 30,
            maker_fee_bps: 10,

            min_stake: 1_000,
            reward_rate_bps: 500, // 5% APR

            voting_period_ms: 7 * DAY_MILLIS,
            execution_delay_ms: 2 * DAY_MILLIS,
            min_proposer_stake: 1_000_000,
            quorum_votes: 2_000_000,

            features: BTreeMap::new(),
            version: 0,
        }
    }

    /// Whether a feature flag is currently enabled. Unknown flags are off.
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

impl Default for GovernanceParameters {
    fn default() -> Self {
        Self::genesis()
    }
}
