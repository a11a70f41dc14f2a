//! Error types for lifegrid.
//!
//! Malformed rule strings are the only error a caller is expected to recover from,
//! usually by falling back to [`Rule::conway`](crate::Rule::conway).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The rule string is not in `B<digits>/S<digits>` or `<digits>/<digits>` form.
    #[error("unknown rule format: {0:?}")]
    UnknownRuleFormat(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool of a concurrent stepper could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
