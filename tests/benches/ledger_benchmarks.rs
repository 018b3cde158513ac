//! # Bond Ledger Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Interest | `calculate_interest` over small and 128-bit principals |
//! | Ledger | purchase prepare + commit on a populated bond |
//! | Ledger | supply aggregation over many holders |

use bond_ledger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

const NOW: Timestamp = 1_700_000_000;
const ISSUER: Address = Address([0x11; 20]);

fn populated_ledger(holders: usize) -> (LedgerState, BondId) {
    let mut state = LedgerState::new(Address::new([0xEE; 20]));
    state
        .register_company(ISSUER, "Acme", "Widgets", "")
        .expect("register");
    let bond = state
        .create_bond(ISSUER, "Acme-5Y", NOW + 5 * SECONDS_PER_YEAR, 500)
        .expect("create");

    let mut rng = rand::thread_rng();
    for _ in 0..holders {
        let buyer = Address::new(rng.gen());
        let plan = state
            .prepare_purchase(buyer, bond, U256::from(rng.gen_range(1u64..1_000_000)), NOW)
            .expect("purchase");
        state.commit_purchase(&plan);
    }
    (state, bond)
}

fn bench_interest(c: &mut Criterion) {
    let mut group = c.benchmark_group("interest");
    let maturity = NOW + 5 * SECONDS_PER_YEAR;

    group.bench_function("small_principal", |b| {
        b.iter(|| calculate_interest(black_box(U256::from(1_000)), 500, maturity, NOW))
    });
    group.bench_function("u128_principal", |b| {
        b.iter(|| calculate_interest(black_box(U256::from(u128::MAX)), 500, maturity, NOW))
    });
    group.finish();
}

fn bench_purchase(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_purchase");
    for holders in [10usize, 1_000, 10_000] {
        let (mut state, bond) = populated_ledger(holders);
        let buyer = Address::new([0xA1; 20]);
        group.bench_with_input(BenchmarkId::from_parameter(holders), &holders, |b, _| {
            b.iter(|| {
                let plan = state
                    .prepare_purchase(buyer, bond, black_box(U256::from(100)), NOW)
                    .expect("purchase");
                state.commit_purchase(&plan);
            })
        });
    }
    group.finish();
}

fn bench_supply(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_supply");
    for holders in [100usize, 10_000] {
        let (state, bond) = populated_ledger(holders);
        group.throughput(Throughput::Elements(holders as u64));
        group.bench_with_input(BenchmarkId::from_parameter(holders), &holders, |b, _| {
            b.iter(|| black_box(state.supply(bond)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_interest, bench_purchase, bench_supply);
criterion_main!(benches);
