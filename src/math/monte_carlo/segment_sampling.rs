use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::Uniform;

use crate::math::integration::{Estimator, Interval};

/// Averages the lower-rectangle area `min(f(x1), f(x2)) * |x2 - x1|` over
/// `segments` random segments `[x1, x2]` inside `interval`.
///
/// This is a heuristic, not an unbiased estimator of the integral: a single
/// rectangle covers only part of the curve, so the average sits well below the
/// true area for most integrands. Zero segments yield `0.0`.
pub fn segment_sampling<F, R>(f: F, interval: Interval, segments: usize, rng: &mut R) -> f64
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    if segments == 0 {
        return 0.0;
    }
    let uniform = Uniform::new_inclusive(interval.lower(), interval.upper());
    let mut sum = 0.0;
    for _ in 0..segments {
        let x1 = uniform.sample(rng);
        let x2 = uniform.sample(rng);
        sum += f(x1).min(f(x2)) * (x2 - x1).abs();
    }
    sum / segments as f64
}

#[derive(Debug, Clone)]
pub struct SegmentEstimator<F, R = ChaCha20Rng> {
    integrand: F,
    interval: Interval,
    rng: R,
}

impl<F> SegmentEstimator<F, ChaCha20Rng>
where
    F: Fn(f64) -> f64,
{
    pub fn from_entropy(integrand: F, interval: Interval) -> Self {
        Self::with_rng(integrand, interval, ChaCha20Rng::from_entropy())
    }

    pub fn seeded(integrand: F, interval: Interval, seed: u64) -> Self {
        Self::with_rng(integrand, interval, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<F, R> SegmentEstimator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    pub fn with_rng(integrand: F, interval: Interval, rng: R) -> Self {
        Self {
            integrand,
            interval,
            rng,
        }
    }
}

impl<F, R> Estimator for SegmentEstimator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    fn estimate(&mut self, sample_count: usize) -> f64 {
        segment_sampling(&self.integrand, self.interval, sample_count, &mut self.rng)
    }
}
