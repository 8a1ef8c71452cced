use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use aleator::{Compare, SprtConfig, Variate};

fn bench_leaf_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaf_draws");

    let normal = Variate::normal(0.0, 1.0);
    group.bench_function("normal", |b| b.iter(|| black_box(normal.sample())));

    let uniform = Variate::uniform(0.0, 1.0);
    group.bench_function("uniform", |b| b.iter(|| black_box(uniform.sample())));

    let poisson = Variate::poisson(4.0);
    group.bench_function("poisson", |b| b.iter(|| black_box(poisson.sample())));

    group.finish();
}

fn bench_graph_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_evaluation");

    let x = Variate::normal(0.0, 1.0);
    let shared = x.clone() + x.clone();
    group.bench_function("shared_leaf_sum", |b| b.iter(|| black_box(shared.sample())));

    let independent = Variate::normal(0.0, 1.0) + Variate::normal(0.0, 1.0);
    group.bench_function("independent_sum", |b| {
        b.iter(|| black_box(independent.sample()));
    });

    let mut chain = Variate::normal(0.0, 1.0);
    for _ in 0..64 {
        chain = chain + Variate::normal(0.0, 1.0);
    }
    group.bench_function("chain_of_64_leaves", |b| b.iter(|| black_box(chain.sample())));

    let predicate = x.gt(0.5);
    group.bench_function("comparison", |b| b.iter(|| black_box(predicate.sample())));

    group.finish();
}

fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimators");
    group.measurement_time(Duration::from_secs(10));

    let normal = Variate::normal(0.0, 1.0);
    let sample_count = 10_000;

    group.bench_function("take_samples", |b| {
        b.iter(|| black_box(normal.take_samples(sample_count)));
    });
    group.bench_function("expected_value", |b| {
        b.iter(|| black_box(normal.expected_value(sample_count)));
    });
    group.bench_function("variance", |b| {
        b.iter(|| black_box(normal.variance(sample_count)));
    });
    group.bench_function("confidence_interval", |b| {
        b.iter(|| black_box(normal.confidence_interval(0.95, sample_count)));
    });

    group.finish();
}

fn bench_decisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("decisions");

    let lopsided = Variate::bernoulli(0.95);
    group.bench_function("sprt_early_stop", |b| {
        b.iter(|| black_box(lopsided.sprt(0.6, &SprtConfig::default())));
    });

    let ambiguous = Variate::bernoulli(0.55);
    let budget = SprtConfig {
        max_samples: 1000,
        ..SprtConfig::default()
    };
    group.bench_function("sprt_frequency_fallback", |b| {
        b.iter(|| black_box(ambiguous.sprt(0.5, &budget)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_leaf_draws,
    bench_graph_evaluation,
    bench_estimators,
    bench_decisions
);
criterion_main!(benches);
