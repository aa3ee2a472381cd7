use log::warn;
use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::Uniform;

use crate::error::{Error, Result};
use crate::math::integration::{Estimator, Interval};

/// Counts from one round of dart throwing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DartTally {
    pub samples: usize,
    /// Darts that landed strictly below the curve
    pub hits: usize,
    /// Draws where the integrand left `[0, height]`
    pub out_of_bounds: usize,
}

impl DartTally {
    /// Fraction of the bounding box under the curve, scaled to `box_area`.
    pub fn area(&self, box_area: f64) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        box_area * self.hits as f64 / self.samples as f64
    }
}

/// Scatters `samples` points uniformly in the box `interval x [0, height]`
/// and counts hits below the curve along with bound violations.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `height` is not a positive finite number
/// small enough to sample.
pub fn throw_darts<F, R>(
    f: F,
    interval: Interval,
    height: f64,
    samples: usize,
    rng: &mut R,
) -> Result<DartTally>
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    check_height(height)?;
    Ok(tally(f, interval, height, samples, rng))
}

/// Estimates the area under `f` over `interval` by dart throwing.
///
/// `f` must be non-negative and bounded by `height` on the interval or the
/// estimate is biased. Draws that violate the bound are counted and reported
/// with a single warning per call. Zero samples yield `0.0`.
pub fn rejection_sampling<F, R>(
    f: F,
    interval: Interval,
    height: f64,
    samples: usize,
    rng: &mut R,
) -> Result<f64>
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    check_height(height)?;
    Ok(area(f, interval, height, samples, rng))
}

fn check_height(height: f64) -> Result<()> {
    if !height.is_finite() || height <= 0.0 || height > f64::MAX / 2.0 {
        return Err(Error::invalid(format!(
            "dart bounding height must be positive and finite, got {height}"
        )));
    }
    Ok(())
}

fn tally<F, R>(f: F, interval: Interval, height: f64, samples: usize, rng: &mut R) -> DartTally
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    let mut tally = DartTally {
        samples,
        ..DartTally::default()
    };
    if samples == 0 {
        return tally;
    }
    let xs = Uniform::new_inclusive(interval.lower(), interval.upper());
    let ys = Uniform::new_inclusive(0.0, height);
    for _ in 0..samples {
        let x = xs.sample(rng);
        let y = ys.sample(rng);
        let fx = f(x);
        if !(0.0..=height).contains(&fx) {
            tally.out_of_bounds += 1;
        }
        if y < fx {
            tally.hits += 1;
        }
    }
    tally
}

fn area<F, R>(f: F, interval: Interval, height: f64, samples: usize, rng: &mut R) -> f64
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    let tally = tally(f, interval, height, samples, rng);
    if tally.out_of_bounds > 0 {
        warn!(
            "integrand left [0, {height}] at {} of {samples} draws; dart estimate is biased",
            tally.out_of_bounds
        );
    }
    tally.area(interval.width() * height)
}

/// Dart-throwing estimator with an explicit bounding height.
#[derive(Debug, Clone)]
pub struct DartEstimator<F, R = ChaCha20Rng> {
    integrand: F,
    interval: Interval,
    height: f64,
    rng: R,
}

impl<F> DartEstimator<F, ChaCha20Rng>
where
    F: Fn(f64) -> f64,
{
    pub fn from_entropy(integrand: F, interval: Interval, height: f64) -> Result<Self> {
        Self::with_rng(integrand, interval, height, ChaCha20Rng::from_entropy())
    }

    pub fn seeded(integrand: F, interval: Interval, height: f64, seed: u64) -> Result<Self> {
        Self::with_rng(integrand, interval, height, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<F, R> DartEstimator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    /// Fails when `height` is not a positive finite number.
    pub fn with_rng(integrand: F, interval: Interval, height: f64, rng: R) -> Result<Self> {
        check_height(height)?;
        Ok(Self {
            integrand,
            interval,
            height,
            rng,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Area of the bounding box the darts are thrown into.
    pub fn box_area(&self) -> f64 {
        self.interval.width() * self.height
    }
}

impl<F, R> Estimator for DartEstimator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    fn estimate(&mut self, sample_count: usize) -> f64 {
        area(
            &self.integrand,
            self.interval,
            self.height,
            sample_count,
            &mut self.rng,
        )
    }
}
