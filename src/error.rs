use thiserror::Error;

/// Errors raised by the estimators, the searches and the sweep.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A parameter was rejected before any estimator was invoked.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The sample budget ran out before the target accuracy was certified.
    #[error(
        "sample budget exhausted at n = {sample_count}: worst-case error {worst_case_error:.3e} does not meet target {target:.3e}"
    )]
    InsufficientBudget {
        sample_count: usize,
        worst_case_error: f64,
        target: f64,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
