pub mod midpoint;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A closed integration interval `[lower, upper]`.
///
/// Deserialization goes through [`Interval::new`], so a decoded interval
/// satisfies the same invariants as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
struct RawInterval {
    lower: f64,
    upper: f64,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.lower, raw.upper)
    }
}

impl Interval {
    /// Creates an interval, rejecting non-finite bounds, `lower > upper` and
    /// widths too large to sample uniformly.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        let interval = Self { lower, upper };
        interval.validate()?;
        Ok(interval)
    }

    /// Re-checks the invariants enforced by [`Interval::new`].
    pub fn validate(&self) -> Result<()> {
        let (lower, upper) = (self.lower, self.upper);
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::invalid(format!(
                "interval bounds must be finite, got [{lower}, {upper}]"
            )));
        }
        if lower > upper {
            return Err(Error::invalid(format!(
                "interval lower bound {lower} exceeds upper bound {upper}"
            )));
        }
        // Uniform sampling scales the width up slightly, so leave headroom.
        let width = upper - lower;
        if !width.is_finite() || width > f64::MAX / 2.0 {
            return Err(Error::invalid(format!(
                "interval [{lower}, {upper}] is too wide to integrate"
            )));
        }
        Ok(())
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Centre of the `i`-th of `n` equal-width sub-intervals.
    pub fn midpoint_of(&self, i: usize, n: usize) -> f64 {
        let h = self.width() / n as f64;
        self.lower + h * (i as f64 + 0.5)
    }
}

/// Anything that turns a sample count into an estimate of an integral.
///
/// Deterministic estimators return the same value for the same count.
/// Stochastic estimators own their random source and return an independent
/// draw on every call.
pub trait Estimator {
    fn estimate(&mut self, sample_count: usize) -> f64;
}

impl<F> Estimator for F
where
    F: FnMut(usize) -> f64,
{
    fn estimate(&mut self, sample_count: usize) -> f64 {
        self(sample_count)
    }
}
