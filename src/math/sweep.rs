use std::f64::consts::PI;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::integration::{midpoint::MidpointRule, Interval};
use crate::math::monte_carlo::{DartEstimator, MeanValueEstimator};
use crate::math::search::{
    confidence_bounded_search, incremental_search, SearchConfig, SearchOutcome,
};

/// Configuration for an accuracy sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Integration interval
    pub interval: Interval,
    /// Closed-form value of the integral
    pub true_value: f64,
    /// Upper bound of the integrand on the interval, used by the dart estimator
    pub dart_height: f64,
    /// Relative accuracy targets; each yields tolerance `(1 - a) * |true_value|`
    pub accuracies: Vec<f64>,
    /// Settings for the Monte Carlo searches
    pub search: SearchConfig,
    /// Iteration cap for the midpoint scan
    pub max_rect_iterations: usize,
    /// Seed for reproducible runs; `None` draws from system entropy
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Interval::new(0.0, PI).expect("0 <= pi"),
            true_value: 2.0,
            dart_height: 1.0,
            accuracies: vec![0.9, 0.99, 0.999, 0.99999],
            search: SearchConfig::default(),
            max_rect_iterations: 1_000_000,
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        self.interval.validate()?;
        if !self.true_value.is_finite() || self.true_value == 0.0 {
            return Err(Error::invalid(format!(
                "true value must be finite and non-zero for relative targets, got {}",
                self.true_value
            )));
        }
        if self.accuracies.is_empty() {
            return Err(Error::invalid("at least one accuracy target is required"));
        }
        for &accuracy in &self.accuracies {
            if !(accuracy > 0.0 && accuracy < 1.0) {
                return Err(Error::invalid(format!(
                    "accuracy targets must lie strictly between 0 and 1, got {accuracy}"
                )));
            }
        }
        if !self.dart_height.is_finite()
            || self.dart_height <= 0.0
            || self.dart_height > f64::MAX / 2.0
        {
            return Err(Error::invalid(format!(
                "dart height must be positive and finite, got {}",
                self.dart_height
            )));
        }
        if self.max_rect_iterations == 0 {
            return Err(Error::invalid("max_rect_iterations must be at least 1"));
        }
        self.search.validate()
    }

    /// Absolute tolerance for a relative accuracy target.
    pub fn tolerance(&self, accuracy: f64) -> f64 {
        (1.0 - accuracy) * self.true_value.abs()
    }
}

/// Sample counts found by each method for one accuracy target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub accuracy: f64,
    pub tolerance: f64,
    pub rect: SearchOutcome,
    pub mc_mean: SearchOutcome,
    pub mc_dart: SearchOutcome,
}

impl SweepRow {
    pub fn all_achieved(&self) -> bool {
        self.rect.achieved && self.mc_mean.achieved && self.mc_dart.achieved
    }
}

/// Runs the midpoint scan and both Monte Carlo searches for every accuracy
/// target in `config`, in order.
///
/// Each stochastic estimator gets its own generator. With a seed, those
/// generators are derived from a ChaCha20 stream seeded with it, so a sweep
/// is reproducible.
///
/// # Examples
///
/// ```
/// use quadbudget::math::search::SearchConfig;
/// use quadbudget::math::sweep::{run_sweep, SweepConfig};
///
/// let config = SweepConfig {
///     accuracies: vec![0.9],
///     search: SearchConfig {
///         max_samples: 5_000,
///         ..SearchConfig::default()
///     },
///     seed: Some(1),
///     ..SweepConfig::default()
/// };
/// let rows = run_sweep(f64::sin, &config).unwrap();
/// assert_eq!(rows[0].rect.sample_count, 3);
/// ```
pub fn run_sweep<F>(integrand: F, config: &SweepConfig) -> Result<Vec<SweepRow>>
where
    F: Fn(f64) -> f64 + Copy,
{
    config.validate()?;

    let mut master = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let mut rows = Vec::with_capacity(config.accuracies.len());
    for &accuracy in &config.accuracies {
        let tolerance = config.tolerance(accuracy);

        let mut rule = MidpointRule::new(integrand, config.interval);
        let rect = incremental_search(
            &mut rule,
            tolerance,
            config.true_value,
            config.max_rect_iterations,
        )?;

        let mut mean = MeanValueEstimator::seeded(integrand, config.interval, master.gen());
        let mc_mean =
            confidence_bounded_search(&mut mean, tolerance, config.true_value, &config.search)?;

        let mut dart = DartEstimator::seeded(
            integrand,
            config.interval,
            config.dart_height,
            master.gen(),
        )?;
        let mc_dart =
            confidence_bounded_search(&mut dart, tolerance, config.true_value, &config.search)?;

        info!(
            "accuracy {accuracy}: rect={} mc_mean={} mc_dart={}",
            rect.sample_count, mc_mean.sample_count, mc_dart.sample_count
        );
        rows.push(SweepRow {
            accuracy,
            tolerance,
            rect,
            mc_mean,
            mc_dart,
        });
    }
    Ok(rows)
}
