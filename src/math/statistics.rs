use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Error, Result};
use crate::math::integration::Estimator;

/// Smallest batch for which an unbiased variance is defined.
pub const MIN_TRIALS: usize = 2;

/// Two-sided standard-normal critical value for `confidence`.
///
/// # Examples
///
/// ```
/// use quadbudget::math::statistics::z_score;
///
/// let z = z_score(0.95).unwrap();
/// assert!((z - 1.96).abs() < 1e-3);
/// ```
pub fn z_score(confidence: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(Error::invalid(format!(
            "confidence must lie strictly between 0 and 1, got {confidence}"
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::invalid(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// Estimates produced by repeated calls to an estimator at one sample count.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch {
    estimates: Vec<f64>,
}

impl TrialBatch {
    /// Wraps a set of estimates. At least [`MIN_TRIALS`] are required.
    pub fn new(estimates: Vec<f64>) -> Result<Self> {
        if estimates.len() < MIN_TRIALS {
            return Err(Error::invalid(format!(
                "a trial batch needs at least {MIN_TRIALS} estimates, got {}",
                estimates.len()
            )));
        }
        Ok(Self { estimates })
    }

    /// Calls `estimator` `trials` times at `sample_count`.
    pub fn run<E>(estimator: &mut E, sample_count: usize, trials: usize) -> Result<Self>
    where
        E: Estimator + ?Sized,
    {
        if trials < MIN_TRIALS {
            return Err(Error::invalid(format!(
                "a trial batch needs at least {MIN_TRIALS} trials, got {trials}"
            )));
        }
        let estimates = (0..trials)
            .map(|_| estimator.estimate(sample_count))
            .collect();
        Self::new(estimates)
    }

    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.estimates.iter().sum::<f64>() / self.len() as f64
    }

    /// Unbiased sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let sum_sq: f64 = self.estimates.iter().map(|x| (x - mean).powi(2)).sum();
        (sum_sq / (self.len() - 1) as f64).sqrt()
    }

    /// Standard error of the mean.
    pub fn std_error(&self) -> f64 {
        self.std_dev() / (self.len() as f64).sqrt()
    }

    pub fn confidence_interval(&self, z: f64) -> ConfidenceInterval {
        ConfidenceInterval {
            mean: self.mean(),
            margin: z * self.std_error(),
        }
    }
}

/// `mean ± margin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub margin: f64,
}

impl ConfidenceInterval {
    pub fn lower(&self) -> f64 {
        self.mean - self.margin
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.margin
    }

    /// Largest distance from `true_value` of any point in the interval.
    pub fn worst_case_error(&self, true_value: f64) -> f64 {
        (self.mean - true_value).abs() + self.margin
    }

    /// True when the whole interval lies strictly within `target` of `true_value`.
    pub fn meets(&self, true_value: f64, target: f64) -> bool {
        self.worst_case_error(true_value) < target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_z_score_common_levels() {
        assert_abs_diff_eq!(z_score(0.95).unwrap(), 1.959964, epsilon = 1e-5);
        assert_abs_diff_eq!(z_score(0.99).unwrap(), 2.575829, epsilon = 1e-5);
        assert_abs_diff_eq!(z_score(0.6826895).unwrap(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_z_score_rejects_out_of_range() {
        for c in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(z_score(c), Err(Error::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_batch_statistics() {
        let batch = TrialBatch::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(batch.len(), 8);
        assert_relative_eq!(batch.mean(), 5.0);
        // Sum of squared deviations is 32, unbiased variance 32 / 7.
        assert_relative_eq!(batch.std_dev(), (32.0_f64 / 7.0).sqrt());
        assert_relative_eq!(batch.std_error(), (32.0_f64 / 7.0).sqrt() / 8.0_f64.sqrt());
    }

    #[test]
    fn test_zero_variance_batch() {
        let batch = TrialBatch::new(vec![2.0; 5]).unwrap();
        assert_eq!(batch.std_dev(), 0.0);
        let ci = batch.confidence_interval(1.96);
        assert_eq!(ci.margin, 0.0);
        assert!(ci.meets(2.0, 1e-12));
    }

    #[test]
    fn test_batch_requires_two_estimates() {
        assert!(TrialBatch::new(vec![]).is_err());
        assert!(TrialBatch::new(vec![1.0]).is_err());
        assert!(TrialBatch::new(vec![1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_run_calls_estimator_per_trial() {
        let mut calls = Vec::new();
        let mut estimator = |n: usize| {
            calls.push(n);
            n as f64
        };
        let batch = TrialBatch::run(&mut estimator, 40, 3).unwrap();
        assert_eq!(batch.estimates(), &[40.0, 40.0, 40.0]);
        assert_eq!(calls, vec![40, 40, 40]);
    }

    #[test]
    fn test_run_rejects_single_trial_without_calling() {
        let mut calls = 0;
        let mut estimator = |_: usize| {
            calls += 1;
            0.0
        };
        assert!(TrialBatch::run(&mut estimator, 10, 1).is_err());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_confidence_interval_bounds() {
        let ci = ConfidenceInterval {
            mean: 2.1,
            margin: 0.05,
        };
        assert_relative_eq!(ci.lower(), 2.05, epsilon = 1e-12);
        assert_relative_eq!(ci.upper(), 2.15, epsilon = 1e-12);
        assert_relative_eq!(ci.worst_case_error(2.0), 0.15, epsilon = 1e-12);
        assert!(ci.meets(2.0, 0.2));
        assert!(!ci.meets(2.0, 0.1));
    }
}
