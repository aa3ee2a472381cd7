pub mod monte_carlo_integration;
pub mod rejection_sampling;
pub mod segment_sampling;

pub use monte_carlo_integration::{monte_carlo_integration, MeanValueEstimator};
pub use rejection_sampling::{rejection_sampling, throw_darts, DartEstimator, DartTally};
pub use segment_sampling::{segment_sampling, SegmentEstimator};
