use crate::math::integration::{Estimator, Interval};

/// Integrates `f` over `interval` with the composite midpoint rule on `n`
/// equal-width sub-intervals. Zero partitions yield `0.0`.
///
/// # Examples
///
/// ```
/// use quadbudget::math::integration::{midpoint::midpoint_rule, Interval};
///
/// let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();
/// let estimate = midpoint_rule(f64::sin, interval, 1000);
/// assert!((estimate - 2.0).abs() < 1e-5);
/// ```
pub fn midpoint_rule<F>(f: F, interval: Interval, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return 0.0;
    }
    let h = interval.width() / n as f64;
    let sum: f64 = (0..n).map(|i| f(interval.midpoint_of(i, n))).sum();
    sum * h
}

/// Deterministic estimator backed by [`midpoint_rule`].
#[derive(Debug, Clone)]
pub struct MidpointRule<F> {
    integrand: F,
    interval: Interval,
}

impl<F> MidpointRule<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(integrand: F, interval: Interval) -> Self {
        Self {
            integrand,
            interval,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }
}

impl<F> Estimator for MidpointRule<F>
where
    F: Fn(f64) -> f64,
{
    fn estimate(&mut self, sample_count: usize) -> f64 {
        midpoint_rule(&self.integrand, self.interval, sample_count)
    }
}
