use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadbudget::math::integration::{midpoint::MidpointRule, Estimator, Interval};
use quadbudget::math::monte_carlo::{DartEstimator, MeanValueEstimator};
use std::f64::consts::PI;

fn bench_estimators(c: &mut Criterion) {
    let interval = Interval::new(0.0, PI).unwrap();
    let mut group = c.benchmark_group("estimators");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("midpoint", size), &size, |b, &n| {
            let mut rule = MidpointRule::new(f64::sin, interval);
            b.iter(|| rule.estimate(black_box(n)));
        });

        group.bench_with_input(BenchmarkId::new("mc_mean", size), &size, |b, &n| {
            let mut estimator = MeanValueEstimator::seeded(f64::sin, interval, 42);
            b.iter(|| estimator.estimate(black_box(n)));
        });

        group.bench_with_input(BenchmarkId::new("mc_dart", size), &size, |b, &n| {
            let mut estimator = DartEstimator::seeded(f64::sin, interval, 1.0, 42).unwrap();
            b.iter(|| estimator.estimate(black_box(n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimators);
criterion_main!(benches);
