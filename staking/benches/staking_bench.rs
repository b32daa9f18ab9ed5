use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use vesta_staking::{accrued_reward, StakePool};
use vesta_types::time::YEAR_MILLIS;
use vesta_types::{Address, GovernanceParameters, Timestamp};

fn make_pool(stakers: usize, params: &GovernanceParameters) -> StakePool {
    let mut pool = StakePool::new();
    for i in 0..stakers {
        let owner = Address::new(format!("0x{:040x}", i));
        pool.stake(&owner, 1_000_000 + i as u128, Timestamp::new(0), params)
            .unwrap();
    }
    pool
}

fn bench_accrued_reward(c: &mut Criterion) {
    c.bench_function("accrued_reward", |b| {
        b.iter(|| {
            black_box(accrued_reward(
                black_box(1_000_000_000),
                black_box(500),
                black_box(YEAR_MILLIS),
            ))
        });
    });
}

fn bench_claim_rewards(c: &mut Criterion) {
    let mut group = c.benchmark_group("claim_rewards");
    let params = GovernanceParameters::genesis();

    for stakers in [10, 1_000, 100_000] {
        let pool = make_pool(stakers, &params);
        let owner = Address::new(format!("0x{:040x}", stakers / 2));
        let id = pool.stake_of(&owner).unwrap().id;

        group.bench_with_input(BenchmarkId::new("stakers", stakers), &stakers, |b, _| {
            b.iter_batched(
                || pool.clone(),
                |mut pool| {
                    black_box(
                        pool.claim_rewards(&owner, id, Timestamp::new(YEAR_MILLIS), &params)
                            .unwrap(),
                    )
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_accrued_reward, bench_claim_rewards);
criterion_main!(benches);
