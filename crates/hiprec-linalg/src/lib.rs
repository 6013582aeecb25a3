//! # hiprec-linalg
//!
//! Dense linear algebra over [`PrecFloat`] and `f64`.
//!
//! This crate provides:
//! - The [`Scalar`] contract with cost hints and precision accessors
//! - Row-major dense matrices with Gauss-Jordan inversion
//! - Dense column vectors and quadratic forms
//! - Parallel products via rayon
//!
//! ```
//! use hiprec_float::Precision;
//! use hiprec_linalg::PrecMatrix;
//!
//! let p = Precision::new(128).unwrap();
//! let m = PrecMatrix::from_rows(vec![
//!     vec![p.from_i64(2), p.from_i64(1)],
//!     vec![p.from_i64(1), p.from_i64(1)],
//! ]);
//! let inv = m.inverse().unwrap();
//! assert_eq!(inv[(0, 1)], -1_i64);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod dense_vector;
pub mod parallel;
mod traits;

pub use dense_matrix::DenseMatrix;
pub use dense_vector::DenseVector;
pub use parallel::ParallelConfig;
pub use traits::Scalar;

use hiprec_float::PrecFloat;

/// A dynamically sized matrix of arbitrary precision scalars.
pub type PrecMatrix = DenseMatrix<PrecFloat>;

/// A dynamically sized column vector of arbitrary precision scalars.
pub type PrecVector = DenseVector<PrecFloat>;

#[cfg(test)]
mod tests;
