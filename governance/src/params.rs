//! All governable protocol parameters.
//!
//! Every numeric field of [`GovernanceParameters`] can be changed by a passed
//! proposal, including the governance thresholds themselves.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use vesta_types::time::DAY_MILLIS;
use vesta_types::GovernanceParameters;

/// Highest fee accepted for either fee parameter (10%).
pub const MAX_FEE_BPS: u128 = 1_000;

/// Highest reward rate accepted (100% APR).
pub const MAX_REWARD_RATE_BPS: u128 = 10_000;

/// Longest voting period or execution delay accepted (365 days).
///
/// Two maximal durations added to any realistic wall-clock timestamp stay
/// well inside `u64` milliseconds.
pub const MAX_DURATION_MS: u128 = 365 * DAY_MILLIS as u128;

/// Enum of all protocol parameters that can be changed by governance vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernableParam {
    // Fees
    TakerFeeBps,
    MakerFeeBps,

    // Staking
    MinStake,
    RewardRateBps,

    // Governance (self-governing!)
    VotingPeriodMs,
    ExecutionDelayMs,
    MinProposerStake,
    QuorumVotes,
}

impl GovernableParam {
    pub const ALL: [GovernableParam; 8] = [
        Self::TakerFeeBps,
        Self::MakerFeeBps,
        Self::MinStake,
        Self::RewardRateBps,
        Self::VotingPeriodMs,
        Self::ExecutionDelayMs,
        Self::MinProposerStake,
        Self::QuorumVotes,
    ];

    /// Human-readable name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TakerFeeBps => "taker_fee_bps",
            Self::MakerFeeBps => "maker_fee_bps",
            Self::MinStake => "min_stake",
            Self::RewardRateBps => "reward_rate_bps",
            Self::VotingPeriodMs => "voting_period_ms",
            Self::ExecutionDelayMs => "execution_delay_ms",
            Self::MinProposerStake => "min_proposer_stake",
            Self::QuorumVotes => "quorum_votes",
        }
    }

    /// Check that `value` is acceptable for this parameter.
    pub fn validate(&self, value: u128) -> Result<(), GovernanceError> {
        let out_of_range = |reason| GovernanceError::ParameterOutOfRange {
            param: self.name(),
            value,
            reason,
        };
        match self {
            Self::TakerFeeBps | Self::MakerFeeBps if value > MAX_FEE_BPS => {
                Err(out_of_range("fee must be within [0, 1000] bps"))
            }
            Self::RewardRateBps if value > MAX_REWARD_RATE_BPS => {
                Err(out_of_range("reward rate must be within [0, 10000] bps"))
            }
            Self::VotingPeriodMs | Self::ExecutionDelayMs if value == 0 => {
                Err(out_of_range("duration must be positive"))
            }
            Self::VotingPeriodMs | Self::ExecutionDelayMs if value > MAX_DURATION_MS => {
                Err(out_of_range("duration must not exceed 365 days"))
            }
            Self::MinStake if value == 0 => Err(out_of_range("minimum stake must be positive")),
            _ => Ok(()),
        }
    }

    /// Current value of this parameter.
    pub fn current(&self, params: &GovernanceParameters) -> u128 {
        match self {
            Self::TakerFeeBps => params.taker_fee_bps as u128,
            Self::MakerFeeBps => params.maker_fee_bps as u128,
            Self::MinStake => params.min_stake,
            Self::RewardRateBps => params.reward_rate_bps as u128,
            Self::VotingPeriodMs => params.voting_period_ms as u128,
            Self::ExecutionDelayMs => params.execution_delay_ms as u128,
            Self::MinProposerStake => params.min_proposer_stake,
            Self::QuorumVotes => params.quorum_votes,
        }
    }

    /// Validate and write `value`, returning the previous value.
    ///
    /// Does not bump `params.version`; the execution engine owns versioning.
    pub fn apply(
        &self,
        params: &mut GovernanceParameters,
        value: u128,
    ) -> Result<u128, GovernanceError> {
        self.validate(value)?;
        let old = self.current(params);
        // validate() bounds every narrowed field, so these conversions cannot fail.
        let as_u32 = |v: u128| u32::try_from(v).map_err(|_| GovernanceError::Overflow);
        let as_u64 = |v: u128| u64::try_from(v).map_err(|_| GovernanceError::Overflow);
        match self {
            Self::TakerFeeBps => params.taker_fee_bps = as_u32(value)?,
            Self::MakerFeeBps => params.maker_fee_bps = as_u32(value)?,
            Self::MinStake => params.min_stake = value,
            Self::RewardRateBps => params.reward_rate_bps = as_u32(value)?,
            Self::VotingPeriodMs => params.voting_period_ms = as_u64(value)?,
            Self::ExecutionDelayMs => params.execution_delay_ms = as_u64(value)?,
            Self::MinProposerStake => params.min_proposer_stake = value,
            Self::QuorumVotes => params.quorum_votes = value,
        }
        Ok(old)
    }
}

impl fmt::Display for GovernableParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check a whole parameter set, e.g. a genesis configuration.
pub fn validate_all(params: &GovernanceParameters) -> Result<(), GovernanceError> {
    GovernableParam::ALL
        .iter()
        .try_for_each(|p| p.validate(p.current(params)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_is_valid() {
        validate_all(&GovernanceParameters::genesis()).unwrap();
    }

    #[test]
    fn fee_bounds() {
        assert!(GovernableParam::TakerFeeBps.validate(0).is_ok());
        assert!(GovernableParam::TakerFeeBps.validate(1_000).is_ok());
        assert!(matches!(
            GovernableParam::MakerFeeBps.validate(1_001),
            Err(GovernanceError::ParameterOutOfRange {
                param: "maker_fee_bps",
                value: 1_001,
                ..
            })
        ));
    }

    #[test]
    fn reward_rate_bounds() {
        assert!(GovernableParam::RewardRateBps.validate(10_000).is_ok());
        assert!(GovernableParam::RewardRateBps.validate(10_001).is_err());
    }

    #[test]
    fn durations_must_be_positive() {
        assert!(GovernableParam::VotingPeriodMs.validate(0).is_err());
        assert!(GovernableParam::ExecutionDelayMs.validate(0).is_err());
        assert!(GovernableParam::ExecutionDelayMs
            .validate(u64::MAX as u128 + 1)
            .is_err());
        assert!(GovernableParam::VotingPeriodMs.validate(1).is_ok());
    }

    #[test]
    fn durations_capped_at_one_year() {
        for param in [GovernableParam::VotingPeriodMs, GovernableParam::ExecutionDelayMs] {
            assert!(param.validate(MAX_DURATION_MS).is_ok());
            assert!(param.validate(MAX_DURATION_MS + 1).is_err());
            assert!(param.validate(u64::MAX as u128).is_err());
        }
    }

    #[test]
    fn apply_returns_old_value() {
        let mut params = GovernanceParameters::genesis();
        let old = GovernableParam::RewardRateBps
            .apply(&mut params, 700)
            .unwrap();
        assert_eq!(old, 500);
        assert_eq!(params.reward_rate_bps, 700);
    }

    #[test]
    fn apply_rejects_out_of_range_without_writing() {
        let mut params = GovernanceParameters::genesis();
        assert!(GovernableParam::TakerFeeBps
            .apply(&mut params, 5_000)
            .is_err());
        assert_eq!(params, GovernanceParameters::genesis());
    }

    #[test]
    fn serde_names_match_display() {
        for p in GovernableParam::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.name()));
        }
    }
}
