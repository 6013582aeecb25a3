//! # hiprec-float
//!
//! Arbitrary precision binary floating point numbers that round toward
//! negative infinity.
//!
//! This crate wraps `dashu` to provide:
//! - An explicit precision type ([`Precision`]) and a process-wide default
//! - A scalar ([`PrecFloat`]) with IEEE-like infinities and NaN
//! - Elementary functions, `erf` and `erfc` at any precision
//! - The [`Backend`] / [`Real`] seam shared with native `f64`
//!
//! ## Rounding
//!
//! Every operation rounds its exact result toward negative infinity into
//! the target precision. Series evaluations work with guard bits and
//! round once at the end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
mod error;
mod error_func;
pub mod float;
mod fmt;
mod ops;
pub mod precision;
mod traits;
mod transcendental;

#[cfg(test)]
mod proptests;

pub use backend::{Backend, Native, Real};
pub use error::FloatError;
pub use float::{PrecFloat, EXPONENT_LIMIT};
pub use fmt::Notation;
pub use precision::{
    default_precision, digit_count, epsilon, set_default_precision, Precision,
    INITIAL_PRECISION_BITS,
};
