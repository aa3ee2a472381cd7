pub mod confidence_bounded;
pub mod incremental;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::statistics::MIN_TRIALS;

pub use confidence_bounded::confidence_bounded_search;
pub use incremental::incremental_search;

/// Configuration for the confidence-bounded sample-count search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Confidence level of the acceptance interval, in (0, 1)
    pub confidence: f64,
    /// Smallest sample count the search will consider
    pub min_samples: usize,
    /// Hard ceiling on the sample count
    pub max_samples: usize,
    /// Trials per candidate below `batch_size_threshold`
    pub small_batch_trials: usize,
    /// Trials per candidate at or above `batch_size_threshold`
    pub large_batch_trials: usize,
    /// Sample count at which candidates switch to `large_batch_trials`
    pub batch_size_threshold: usize,
    /// Trials used to re-check the bisection result
    pub validation_trials: usize,
    /// Increment applied per fallback step
    pub fallback_step: usize,
    /// Trials per fallback step
    pub fallback_trials: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            min_samples: 100,
            max_samples: 1_000_000,
            small_batch_trials: 30,
            large_batch_trials: 20,
            batch_size_threshold: 10_000,
            validation_trials: 30,
            fallback_step: 100,
            fallback_trials: 20,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(Error::invalid(format!(
                "confidence must lie strictly between 0 and 1, got {}",
                self.confidence
            )));
        }
        if self.min_samples == 0 {
            return Err(Error::invalid("min_samples must be at least 1"));
        }
        if self.min_samples > self.max_samples {
            return Err(Error::invalid(format!(
                "min_samples {} exceeds max_samples {}",
                self.min_samples, self.max_samples
            )));
        }
        let trials = [
            ("small_batch_trials", self.small_batch_trials),
            ("large_batch_trials", self.large_batch_trials),
            ("validation_trials", self.validation_trials),
            ("fallback_trials", self.fallback_trials),
        ];
        for (name, count) in trials {
            if count < MIN_TRIALS {
                return Err(Error::invalid(format!(
                    "{name} must be at least {MIN_TRIALS}, got {count}"
                )));
            }
        }
        if self.fallback_step == 0 {
            return Err(Error::invalid("fallback_step must be at least 1"));
        }
        Ok(())
    }

    /// Trials to run when probing `sample_count` during bisection.
    pub fn trials_for(&self, sample_count: usize) -> usize {
        if sample_count < self.batch_size_threshold {
            self.small_batch_trials
        } else {
            self.large_batch_trials
        }
    }
}

/// Which step of a search produced its answer.
///
/// A bisection result is always re-checked with a fresh batch, so it is
/// reported as `Validation` or superseded by `Fallback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Deterministic linear scan
    Incremental,
    /// Bisection result confirmed by an independent batch
    Validation,
    /// Accepted after stepping past the bisection result
    Fallback,
    /// Budget ran out without an accepted sample count
    Exhausted,
}

/// Result of a sample-count search.
///
/// A search that runs out of budget still returns an outcome, with
/// `achieved == false`; use [`SearchOutcome::require_achieved`] to turn that
/// into an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub sample_count: usize,
    /// Estimate (or batch mean) at `sample_count`
    pub estimate: f64,
    /// Confidence margin at `sample_count`; zero for deterministic searches
    pub margin: f64,
    /// `|estimate - true_value| + margin`
    pub worst_case_error: f64,
    pub target: f64,
    pub achieved: bool,
    pub phase: SearchPhase,
}

impl SearchOutcome {
    pub fn require_achieved(self) -> Result<Self> {
        if self.achieved {
            Ok(self)
        } else {
            Err(Error::InsufficientBudget {
                sample_count: self.sample_count,
                worst_case_error: self.worst_case_error,
                target: self.target,
            })
        }
    }
}

pub(crate) fn check_target(target: f64, true_value: f64) -> Result<()> {
    if !(target > 0.0) || !target.is_finite() {
        return Err(Error::invalid(format!(
            "target accuracy must be a positive finite number, got {target}"
        )));
    }
    if !true_value.is_finite() {
        return Err(Error::invalid(format!(
            "true value must be finite, got {true_value}"
        )));
    }
    Ok(())
}
