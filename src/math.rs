pub mod integration;
pub mod monte_carlo;
pub mod search;
pub mod statistics;
pub mod sweep;

pub use integration::{midpoint::MidpointRule, Estimator, Interval};

pub use monte_carlo::{
    monte_carlo_integration::{monte_carlo_integration, MeanValueEstimator},
    rejection_sampling::{rejection_sampling, throw_darts, DartEstimator, DartTally},
    segment_sampling::{segment_sampling, SegmentEstimator},
};

pub use statistics::{z_score, ConfidenceInterval, TrialBatch};

pub use search::{
    confidence_bounded::confidence_bounded_search, incremental::incremental_search,
    SearchConfig, SearchOutcome, SearchPhase,
};

pub use sweep::{run_sweep, SweepConfig, SweepRow};
