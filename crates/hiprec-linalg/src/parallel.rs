//! Parallel dense kernels.
//!
//! Arbitrary precision products are expensive enough that splitting even
//! moderately sized matrices across rayon's pool pays off.

use rayon::prelude::*;

use crate::dense_matrix::DenseMatrix;
use crate::traits::Scalar;

/// When to switch to the parallel kernels.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum weighted work (multiply-adds times `MUL_COST`) to go parallel.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1 << 14,
        }
    }
}

impl ParallelConfig {
    fn parallel_for<S: Scalar>(&self, multiply_adds: usize) -> bool {
        multiply_adds.saturating_mul(S::MUL_COST) >= self.parallel_threshold
    }
}

/// Matrix-matrix multiply, parallel when the work is large enough.
#[must_use]
pub fn multiply<S: Scalar>(a: &DenseMatrix<S>, b: &DenseMatrix<S>, config: &ParallelConfig) -> DenseMatrix<S> {
    let multiply_adds = a.num_rows() * a.num_cols() * b.num_cols();
    if config.parallel_for::<S>(multiply_adds) {
        a.mm_parallel(b)
    } else {
        a.mm(b)
    }
}

/// Parallel dot product of two slices.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn parallel_dot<S: Scalar>(a: &[S], b: &[S]) -> S {
    assert_eq!(a.len(), b.len());

    a.par_iter()
        .zip(b.par_iter())
        .map(|(ai, bi)| ai.clone() * bi.clone())
        .reduce(S::zero, |acc, x| acc + x)
}

/// Matrix-vector multiply with rows computed in parallel.
///
/// # Panics
///
/// Panics if `x` does not have `num_cols` entries.
pub fn parallel_mv<S: Scalar>(matrix: &DenseMatrix<S>, x: &[S]) -> Vec<S> {
    assert_eq!(x.len(), matrix.num_cols());
    (0..matrix.num_rows())
        .into_par_iter()
        .map(|row| {
            matrix
                .row(row)
                .iter()
                .zip(x.iter())
                .fold(S::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
        })
        .collect()
}
