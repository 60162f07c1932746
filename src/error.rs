//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors raised while building instances, configuring runs, or
/// writing experiment records.
#[derive(Debug, Error)]
pub enum KnapsackError {
    /// Two sequences that must have equal length do not.
    ///
    /// Raised for instances whose weight and value lists differ in length
    /// and for candidates whose length differs from the item count.
    #[error("dimension mismatch: expected {expected} items, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An unknown cooling kind or initial-solution policy was requested.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The weights or values of an instance sum past `u64::MAX`.
    #[error("total {field} of the instance overflows u64")]
    SumOverflow { field: &'static str },

    /// A capped `RandomFeasible` initialization ran out of attempts.
    #[error("no feasible candidate sampled after {attempts} attempts")]
    NoFeasibleSample { attempts: usize },

    /// Writing experiment records failed.
    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KnapsackError>;
