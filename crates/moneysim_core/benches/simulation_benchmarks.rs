//! Criterion benchmarks for moneysim_core simulation
//!
//! Run with: cargo bench -p moneysim_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use moneysim_core::adjust::WhatIf;
use moneysim_core::config::{FinancialInputs, InputsBuilder, SubscriptionBuilder};
use moneysim_core::simulation::{simulate, simulate_what_ifs, simulate_with_metrics};

fn create_household(months: u32) -> FinancialInputs {
    let mut builder = InputsBuilder::new()
        .income(4_200.0)
        .starting_cash(900.0)
        .flex_spend(1_300.0)
        .months(months)
        .bill("Rent", 1_650.0, 1)
        .bill("Car", 320.0, 15)
        .bill("Utilities", 140.0, 20)
        .bill("Phone", 60.0, 20)
        .bill("Insurance", 110.0, 27);

    for (i, day) in [3, 5, 8, 12, 19, 24].into_iter().enumerate() {
        let mut sub = SubscriptionBuilder::new(format!("Service {i}"), 9.99 + i as f64 * 5.0, day);
        if i % 3 == 0 {
            sub = sub.paused_in(1);
        }
        if i == 5 {
            sub = sub.cancelled();
        }
        builder = builder.subscription(sub);
    }

    builder.build()
}

fn bench_horizons(c: &mut Criterion) {
    let mut group = c.benchmark_group("horizon");

    for months in [1, 3, 6] {
        let inputs = create_household(months);
        group.bench_with_input(BenchmarkId::new("months", months), &inputs, |b, inputs| {
            b.iter(|| simulate(black_box(inputs)))
        });
    }

    group.finish();
}

fn bench_instrumented_vs_normal(c: &mut Criterion) {
    let mut group = c.benchmark_group("instrumented_comparison");
    let inputs = create_household(6);

    group.bench_function("normal_simulate", |b| b.iter(|| simulate(black_box(&inputs))));
    group.bench_function("simulate_with_metrics", |b| {
        b.iter(|| simulate_with_metrics(black_box(&inputs)))
    });

    group.finish();
}

fn bench_what_ifs(c: &mut Criterion) {
    let mut group = c.benchmark_group("what_ifs");
    let inputs = create_household(6);

    for count in [10, 100] {
        let what_ifs: Vec<WhatIf> = (0..count)
            .map(|i| WhatIf::new().flex_spend_pct(-(i as f64)))
            .collect();

        group.bench_with_input(BenchmarkId::new("scenarios", count), &what_ifs, |b, what_ifs| {
            b.iter(|| simulate_what_ifs(black_box(&inputs), black_box(what_ifs)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_horizons, bench_instrumented_vs_normal, bench_what_ifs);
criterion_main!(benches);
