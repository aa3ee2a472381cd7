use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::Uniform;

use crate::math::integration::{Estimator, Interval};

/// Performs Monte Carlo integration of the function `f` over `interval` using
/// the specified number of samples drawn from `rng`.
///
/// Returns `(upper - lower) * mean(f(x))`. Zero samples yield `0.0`.
pub fn monte_carlo_integration<F, R>(f: F, interval: Interval, samples: usize, rng: &mut R) -> f64
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    if samples == 0 {
        return 0.0;
    }
    let uniform = Uniform::new_inclusive(interval.lower(), interval.upper());
    let mut sum = 0.0;
    for _ in 0..samples {
        let x = uniform.sample(rng);
        sum += f(x);
    }
    let avg = sum / samples as f64;
    interval.width() * avg
}

/// Mean-value Monte Carlo estimator with its own random source.
#[derive(Debug, Clone)]
pub struct MeanValueEstimator<F, R = ChaCha20Rng> {
    integrand: F,
    interval: Interval,
    rng: R,
}

impl<F> MeanValueEstimator<F, ChaCha20Rng>
where
    F: Fn(f64) -> f64,
{
    /// Creates an estimator seeded from system entropy.
    pub fn from_entropy(integrand: F, interval: Interval) -> Self {
        Self::with_rng(integrand, interval, ChaCha20Rng::from_entropy())
    }

    pub fn seeded(integrand: F, interval: Interval, seed: u64) -> Self {
        Self::with_rng(integrand, interval, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<F, R> MeanValueEstimator<F, R>
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

impl<F, R> Estimator for MeanValueEstimator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    fn estimate(&mut self, sample_count: usize) -> f64 {
        monte_carlo_integration(&self.integrand, self.interval, sample_count, &mut self.rng)
    }
}
