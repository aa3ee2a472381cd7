pub mod error;
pub mod math;
pub mod report;

pub use error::{Error, Result};
pub use math::{
    confidence_bounded_search, incremental_search, run_sweep, Estimator, Interval,
    SearchConfig, SearchOutcome, SweepConfig, SweepRow,
};
