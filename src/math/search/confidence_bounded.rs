use log::{debug, info, warn};

use crate::error::Result;
use crate::math::integration::Estimator;
use crate::math::search::{check_target, SearchConfig, SearchOutcome, SearchPhase};
use crate::math::statistics::{z_score, ConfidenceInterval, TrialBatch};

/// Finds the smallest sample count at which a stochastic estimator is within
/// `target_accuracy` of `true_value` at the configured confidence level.
///
/// Each candidate runs a batch of independent trials and accepts the sample count
/// only if the whole confidence interval of the batch mean lies within the
/// target, i.e. `|mean - true_value| + z * std_error < target_accuracy`.
/// Sufficiency is assumed monotone in the sample count, which holds for
/// estimators whose variance shrinks as the count grows.
///
/// The search runs in three stages:
///
/// 1. bisection over `[min_samples, max_samples]`;
/// 2. re-validation of the converged count with a fresh batch;
/// 3. if that fails, a linear walk upward in `fallback_step` increments until
///    a batch passes or `max_samples` is reached.
///
/// Running out of budget is not an error: the outcome reports
/// `achieved == false` with the last batch's statistics.
///
/// # Errors
///
/// Returns `InvalidConfiguration` before invoking the estimator if the target
/// is not positive, the true value is not finite, or `config` is invalid.
///
/// # Examples
///
/// ```
/// use quadbudget::math::integration::Interval;
/// use quadbudget::math::monte_carlo::MeanValueEstimator;
/// use quadbudget::math::search::{confidence_bounded_search, SearchConfig};
///
/// let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();
/// let mut estimator = MeanValueEstimator::seeded(f64::sin, interval, 7);
/// let config = SearchConfig {
///     max_samples: 5_000,
///     ..SearchConfig::default()
/// };
///
/// let outcome = confidence_bounded_search(&mut estimator, 0.2, 2.0, &config).unwrap();
/// assert!(outcome.achieved);
/// assert!(outcome.sample_count >= config.min_samples);
/// ```
pub fn confidence_bounded_search<E>(
    estimator: &mut E,
    target_accuracy: f64,
    true_value: f64,
    config: &SearchConfig,
) -> Result<SearchOutcome>
where
    E: Estimator + ?Sized,
{
    check_target(target_accuracy, true_value)?;
    config.validate()?;
    let z = z_score(config.confidence)?;

    let mut low = config.min_samples;
    let mut high = config.max_samples;
    while low < high {
        let mid = low + (high - low) / 2;
        let trials = config.trials_for(mid);
        let interval = TrialBatch::run(estimator, mid, trials)?.confidence_interval(z);
        let sufficient = interval.meets(true_value, target_accuracy);
        debug!(
            "bisect n={mid} trials={trials} mean={:.6} margin={:.3e} sufficient={sufficient}",
            interval.mean, interval.margin
        );
        if sufficient {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    let mut candidate = low;
    let mut interval =
        TrialBatch::run(estimator, candidate, config.validation_trials)?.confidence_interval(z);
    if interval.meets(true_value, target_accuracy) {
        info!(
            "validated n={candidate} for target {target_accuracy:.3e} (margin {:.3e})",
            interval.margin
        );
        return Ok(outcome(
            candidate,
            interval,
            true_value,
            target_accuracy,
            SearchPhase::Validation,
        ));
    }

    warn!(
        "n={candidate} failed re-validation for target {target_accuracy:.3e}; stepping by {}",
        config.fallback_step
    );
    while candidate < config.max_samples {
        candidate = candidate
            .saturating_add(config.fallback_step)
            .min(config.max_samples);
        interval =
            TrialBatch::run(estimator, candidate, config.fallback_trials)?.confidence_interval(z);
        if interval.meets(true_value, target_accuracy) {
            info!("fallback accepted n={candidate} for target {target_accuracy:.3e}");
            return Ok(outcome(
                candidate,
                interval,
                true_value,
                target_accuracy,
                SearchPhase::Fallback,
            ));
        }
    }

    warn!(
        "sample budget {} exhausted for target {target_accuracy:.3e}; worst-case error {:.3e}",
        config.max_samples,
        interval.worst_case_error(true_value)
    );
    Ok(outcome(
        candidate,
        interval,
        true_value,
        target_accuracy,
        SearchPhase::Exhausted,
    ))
}

fn outcome(
    sample_count: usize,
    interval: ConfidenceInterval,
    true_value: f64,
    target: f64,
    phase: SearchPhase,
) -> SearchOutcome {
    SearchOutcome {
        sample_count,
        estimate: interval.mean,
        margin: interval.margin,
        worst_case_error: interval.worst_case_error(true_value),
        target,
        achieved: phase != SearchPhase::Exhausted,
        phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::math::integration::Interval;
    use crate::math::monte_carlo::{DartEstimator, MeanValueEstimator};
    use std::f64::consts::PI;

    fn sine_interval() -> Interval {
        Interval::new(0.0, PI).unwrap()
    }

    fn small_config(max_samples: usize) -> SearchConfig {
        SearchConfig {
            max_samples,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_rejects_non_positive_target_before_estimating() {
        let mut calls = 0;
        let mut estimator = |_: usize| {
            calls += 1;
            2.0
        };
        for target in [0.0, -0.1, f64::NAN] {
            let result =
                confidence_bounded_search(&mut estimator, target, 2.0, &SearchConfig::default());
            assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_rejects_invalid_config_before_estimating() {
        let mut calls = 0;
        let mut estimator = |_: usize| {
            calls += 1;
            2.0
        };
        let config = SearchConfig {
            min_samples: 1000,
            max_samples: 10,
            ..SearchConfig::default()
        };
        assert!(confidence_bounded_search(&mut estimator, 0.1, 2.0, &config).is_err());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_exact_estimator_converges_to_minimum() {
        let mut estimator = |_: usize| 2.0;
        let outcome =
            confidence_bounded_search(&mut estimator, 1e-6, 2.0, &small_config(50_000)).unwrap();
        assert_eq!(outcome.sample_count, 100);
        assert_eq!(outcome.margin, 0.0);
        assert!(outcome.achieved);
        assert_eq!(outcome.phase, SearchPhase::Validation);
    }

    #[test]
    fn test_finds_deterministic_threshold() {
        // Error is 1/n, so the smallest n with error < 0.0015 is 667.
        let mut estimator = |n: usize| 2.0 + 1.0 / n as f64;
        let outcome =
            confidence_bounded_search(&mut estimator, 0.0015, 2.0, &small_config(100_000)).unwrap();
        assert_eq!(outcome.sample_count, 667);
        assert!(outcome.achieved);
    }

    #[test]
    fn test_unreachable_target_exhausts_budget() {
        let mut estimator = |_: usize| 2.5;
        let config = small_config(1_000);
        let outcome = confidence_bounded_search(&mut estimator, 0.1, 2.0, &config).unwrap();
        assert_eq!(outcome.sample_count, config.max_samples);
        assert!(!outcome.achieved);
        assert_eq!(outcome.phase, SearchPhase::Exhausted);
        assert!(outcome.require_achieved().is_err());
    }

    #[test]
    fn test_fallback_recovers_from_lucky_bisection() {
        // Every check passes, including the final one at n = 100, but every
        // later batch at n = 100 is off target, so re-validation fails.
        let mut calls_at_minimum = 0usize;
        let mut estimator = |n: usize| {
            if n != 100 {
                return 2.0;
            }
            calls_at_minimum += 1;
            if calls_at_minimum <= 30 {
                2.0
            } else {
                3.0
            }
        };
        let config = SearchConfig {
            min_samples: 100,
            max_samples: 100_000,
            ..SearchConfig::default()
        };
        let outcome = confidence_bounded_search(&mut estimator, 0.01, 2.0, &config).unwrap();
        assert_eq!(outcome.sample_count, 200);
        assert_eq!(outcome.phase, SearchPhase::Fallback);
        assert!(outcome.achieved);
    }

    #[test]
    fn test_equal_bounds_validate_directly() {
        let mut estimator = |_: usize| 2.0;
        let config = SearchConfig {
            min_samples: 300,
            max_samples: 300,
            ..SearchConfig::default()
        };
        let outcome = confidence_bounded_search(&mut estimator, 0.1, 2.0, &config).unwrap();
        assert_eq!(outcome.sample_count, 300);
        assert!(outcome.achieved);
    }

    #[test]
    fn test_result_within_bounds() {
        let config = small_config(20_000);
        for (seed, target) in [(1, 0.2), (2, 0.05), (3, 0.02), (4, 1e-4)] {
            let mut estimator = MeanValueEstimator::seeded(f64::sin, sine_interval(), seed);
            let outcome =
                confidence_bounded_search(&mut estimator, target, 2.0, &config).unwrap();
            assert!(outcome.sample_count >= config.min_samples);
            assert!(outcome.sample_count <= config.max_samples);
        }
    }

    #[test]
    fn test_loose_target_accepts_minimum() {
        let config = small_config(20_000);
        let mut estimator = MeanValueEstimator::seeded(f64::sin, sine_interval(), 10);
        let outcome = confidence_bounded_search(&mut estimator, 0.2, 2.0, &config).unwrap();
        assert!(outcome.achieved);
        assert!(outcome.sample_count <= 200);
        assert!(outcome.worst_case_error < 0.2);
    }

    #[test]
    fn test_acceptance_is_monotone_in_sample_count() {
        let config = small_config(20_000);
        let target = 0.02;
        let mut estimator = MeanValueEstimator::seeded(f64::sin, sine_interval(), 99);
        let outcome = confidence_bounded_search(&mut estimator, target, 2.0, &config).unwrap();
        assert!(outcome.achieved);

        let z = z_score(config.confidence).unwrap();
        for factor in [8, 16, 32] {
            let larger = outcome.sample_count * factor;
            let interval = TrialBatch::run(&mut estimator, larger, config.validation_trials)
                .unwrap()
                .confidence_interval(z);
            assert!(
                interval.meets(2.0, target),
                "n={larger} failed with worst-case error {}",
                interval.worst_case_error(2.0)
            );
        }
    }

    #[test]
    fn test_dart_needs_more_samples_than_mean() {
        // A bounding height of 2 leaves most darts above the curve, so the
        // per-sample variance is roughly nine times that of the mean estimator.
        let config = small_config(50_000);
        let target = 0.01;
        let mut mean = MeanValueEstimator::seeded(f64::sin, sine_interval(), 21);
        let mut dart = DartEstimator::seeded(f64::sin, sine_interval(), 2.0, 22).unwrap();
        let mean_outcome = confidence_bounded_search(&mut mean, target, 2.0, &config).unwrap();
        let dart_outcome = confidence_bounded_search(&mut dart, target, 2.0, &config).unwrap();
        assert!(mean_outcome.achieved);
        assert!(dart_outcome.sample_count > mean_outcome.sample_count);
    }
}
