use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadbudget::math::integration::{midpoint::MidpointRule, Interval};
use quadbudget::math::monte_carlo::MeanValueEstimator;
use quadbudget::math::search::{confidence_bounded_search, incremental_search, SearchConfig};
use std::f64::consts::PI;

fn bench_searches(c: &mut Criterion) {
    let interval = Interval::new(0.0, PI).unwrap();
    let config = SearchConfig {
        max_samples: 20_000,
        ..SearchConfig::default()
    };

    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    group.bench_function("incremental_midpoint_2e-5", |b| {
        b.iter(|| {
            let mut rule = MidpointRule::new(f64::sin, interval);
            incremental_search(&mut rule, black_box(2e-5), 2.0, 1_000_000).unwrap()
        });
    });

    group.bench_function("confidence_bounded_mean_0.02", |b| {
        let mut estimator = MeanValueEstimator::seeded(f64::sin, interval, 7);
        b.iter(|| confidence_bounded_search(&mut estimator, black_box(0.02), 2.0, &config).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_searches);
criterion_main!(benches);
