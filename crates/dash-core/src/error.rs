// File: crates/dash-core/src/error.rs
// Summary: Query error taxonomy surfaced to the shells as user-visible messages.

use thiserror::Error;

/// Errors local to the query layer. An empty result is not an error; a
/// zero-group table is a valid value. None of these are transient, so
/// callers report them and move on rather than retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("invalid price range: min {min} is above max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("unknown grouping dimension '{0}'")]
    UnknownDimension(String),

    #[error("unknown or non-numeric aggregation column '{0}'")]
    UnknownAggregation(String),
}
