//! Source of voting power for proposers and voters.

use vesta_staking::StakePool;
use vesta_types::Address;

/// Anything that can report an address's current voting power.
///
/// The registry reads this once per proposal or ballot and stores the
/// snapshot, so later stake changes never move a recorded tally.
pub trait VotingPower {
    fn voting_power_of(&self, address: &Address) -> u128;
}

impl VotingPower for StakePool {
    fn voting_power_of(&self, address: &Address) -> u128 {
        StakePool::voting_power_of(self, address)
    }
}

impl VotingPower for std::collections::HashMap<Address, u128> {
    fn voting_power_of(&self, address: &Address) -> u128 {
        self.get(address).copied().unwrap_or(0)
    }
}
