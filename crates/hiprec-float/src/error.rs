//! Error types for precision configuration and strict arithmetic.

use thiserror::Error;

/// Errors produced by the arbitrary precision scalar.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FloatError {
    /// A precision of zero bits was requested.
    #[error("invalid precision: {bits} bits (precision must be at least 1 bit)")]
    InvalidPrecision {
        /// The rejected bit count.
        bits: usize,
    },

    /// A strict operation received arguments outside its domain.
    #[error("domain error in {operation}")]
    Domain {
        /// Name of the operation that failed.
        operation: &'static str,
    },

    /// A value was infinite or undefined where a finite one was required.
    #[error("value is not finite")]
    NonFinite,

    /// A string could not be parsed as a number.
    #[error("cannot parse float: {0}")]
    Parse(String),
}
