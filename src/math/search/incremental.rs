use log::{info, warn};

use crate::error::{Error, Result};
use crate::math::integration::Estimator;
use crate::math::search::{check_target, SearchOutcome, SearchPhase};

/// Scans `n = 1, 2, ..., max_iterations` and returns the first `n` whose
/// estimate lies strictly within `tolerance` of `true_value`.
///
/// Intended for deterministic estimators whose error shrinks monotonically,
/// such as the midpoint rule on a smooth integrand. If the scan reaches
/// `max_iterations` without success the outcome has `achieved == false` and
/// carries the last estimate.
///
/// # Examples
///
/// ```
/// use quadbudget::math::integration::{midpoint::MidpointRule, Interval};
/// use quadbudget::math::search::incremental_search;
///
/// let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();
/// let mut rule = MidpointRule::new(f64::sin, interval);
/// let outcome = incremental_search(&mut rule, 0.2, 2.0, 1_000).unwrap();
/// assert_eq!(outcome.sample_count, 3);
/// ```
pub fn incremental_search<E>(
    estimator: &mut E,
    tolerance: f64,
    true_value: f64,
    max_iterations: usize,
) -> Result<SearchOutcome>
where
    E: Estimator + ?Sized,
{
    check_target(tolerance, true_value)?;
    if max_iterations == 0 {
        return Err(Error::invalid("max_iterations must be at least 1"));
    }

    let mut estimate = f64::NAN;
    let mut error = f64::INFINITY;
    for n in 1..=max_iterations {
        estimate = estimator.estimate(n);
        error = (estimate - true_value).abs();
        if error < tolerance {
            info!("incremental search reached tolerance {tolerance:.3e} at n={n}");
            return Ok(SearchOutcome {
                sample_count: n,
                estimate,
                margin: 0.0,
                worst_case_error: error,
                target: tolerance,
                achieved: true,
                phase: SearchPhase::Incremental,
            });
        }
    }

    warn!(
        "incremental search stopped at {max_iterations} iterations; error {error:.3e} above tolerance {tolerance:.3e}"
    );
    Ok(SearchOutcome {
        sample_count: max_iterations,
        estimate,
        margin: 0.0,
        worst_case_error: error,
        target: tolerance,
        achieved: false,
        phase: SearchPhase::Exhausted,
    })
}
