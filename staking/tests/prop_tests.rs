use proptest::prelude::*;

use vesta_staking::{accrued_reward, StakePool};
use vesta_types::time::YEAR_MILLIS;
use vesta_types::{Address, GovernanceParameters, Timestamp};

fn address(n: u8) -> Address {
    Address::new(format!("0x{:040x}", n))
}

fn params(rate_bps: u32) -> GovernanceParameters {
    GovernanceParameters {
        min_stake: 1,
        reward_rate_bps: rate_bps,
        ..GovernanceParameters::genesis()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Stake { who: u8, amount: u128 },
    Withdraw { who: u8, amount: u128 },
    Unstake { who: u8 },
    Claim { who: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..5, 1u128..1_000_000).prop_map(|(who, amount)| Op::Stake { who, amount }),
        (0u8..5, 1u128..1_000_000).prop_map(|(who, amount)| Op::Withdraw { who, amount }),
        (0u8..5).prop_map(|who| Op::Unstake { who }),
        (0u8..5).prop_map(|who| Op::Claim { who }),
    ]
}

proptest! {
    /// The pool total always equals the sum of record principals, whatever
    /// sequence of successful and failing operations is applied.
    #[test]
    fn total_staked_matches_sum_of_principals(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut pool = StakePool::new();
        let p = params(500);
        for (step, op) in ops.into_iter().enumerate() {
            let now = Timestamp::new(step as u64 * 1_000);
            let _ = match op {
                Op::Stake { who, amount } => pool.stake(&address(who), amount, now, &p).map(|_| ()),
                Op::Withdraw { who, amount } => match pool.stake_of(&address(who)).map(|r| r.id) {
                    Some(id) => pool.withdraw(&address(who), id, amount, now, &p).map(|_| ()),
                    None => Ok(()),
                },
                Op::Unstake { who } => match pool.stake_of(&address(who)).map(|r| r.id) {
                    Some(id) => pool.unstake(&address(who), id, now, &p).map(|_| ()),
                    None => Ok(()),
                },
                Op::Claim { who } => match pool.stake_of(&address(who)).map(|r| r.id) {
                    Some(id) => pool.claim_rewards(&address(who), id, now, &p).map(|_| ()),
                    None => Ok(()),
                },
            };
            let sum: u128 = pool.stakes().map(|r| r.principal).sum();
            prop_assert_eq!(sum, pool.total_staked());
        }
    }

    /// A second claim at the same instant pays nothing.
    #[test]
    fn claim_is_idempotent_at_same_instant(
        amount in 1u128..10_000_000_000,
        rate in 0u32..10_000,
        elapsed in 0u64..(10 * YEAR_MILLIS),
    ) {
        let mut pool = StakePool::new();
        let owner = address(1);
        let p = params(rate);
        let id = pool.stake(&owner, amount, Timestamp::new(0), &p).unwrap().value;
        let now = Timestamp::new(elapsed);
        pool.claim_rewards(&owner, id, now, &p).unwrap();
        let second = pool.claim_rewards(&owner, id, now, &p).unwrap();
        prop_assert_eq!(second.value, 0);
    }

    /// Topping up never lowers voting power.
    #[test]
    fn top_up_never_decreases_voting_power(
        first in 1u128..1_000_000_000,
        second in 1u128..1_000_000_000,
    ) {
        let mut pool = StakePool::new();
        let owner = address(1);
        let p = params(500);
        pool.stake(&owner, first, Timestamp::new(0), &p).unwrap();
        let before = pool.voting_power_of(&owner);
        pool.stake(&owner, second, Timestamp::new(1), &p).unwrap();
        prop_assert!(pool.voting_power_of(&owner) >= before);
        prop_assert_eq!(pool.voting_power_of(&owner), first + second);
    }

    /// Integer truncation never pays more than the exact rational reward.
    #[test]
    fn reward_never_rounds_up(
        principal in 0u128..1_000_000_000_000,
        rate in 0u32..10_000,
        elapsed in 0u64..(5 * YEAR_MILLIS),
    ) {
        let reward = accrued_reward(principal, rate, elapsed).unwrap();
        let exact_num = principal * rate as u128 * elapsed as u128;
        let denom = 10_000u128 * YEAR_MILLIS as u128;
        prop_assert!(reward * denom <= exact_num);
        prop_assert!(exact_num - reward * denom < denom);
    }

    /// Splitting a claim window in two never pays more than one claim over the whole window.
    #[test]
    fn split_claims_never_exceed_single_claim(
        amount in 1u128..1_000_000_000,
        split in 1u64..YEAR_MILLIS,
    ) {
        let p = params(500);
        let owner = address(1);

        let mut whole = StakePool::new();
        let id = whole.stake(&owner, amount, Timestamp::new(0), &p).unwrap().value;
        let single = whole.claim_rewards(&owner, id, Timestamp::new(YEAR_MILLIS), &p).unwrap().value;

        let mut parts = StakePool::new();
        let id = parts.stake(&owner, amount, Timestamp::new(0), &p).unwrap().value;
        let a = parts.claim_rewards(&owner, id, Timestamp::new(split), &p).unwrap().value;
        let b = parts.claim_rewards(&owner, id, Timestamp::new(YEAR_MILLIS), &p).unwrap().value;

        prop_assert!(a + b <= single);
    }
}
