//! Dense column vectors.

use std::ops::{Index, IndexMut};

use crate::dense_matrix::{dot, DenseMatrix};
use crate::traits::Scalar;

/// A dynamically sized column vector.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVector<S> {
    data: Vec<S>,
}

impl<S: Scalar> DenseVector<S> {
    /// Creates a zero vector.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![S::zero(); len],
        }
    }

    /// Wraps existing entries.
    #[must_use]
    pub fn from_vec(data: Vec<S>) -> Self {
        Self { data }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }

    /// Consumes the vector, returning its entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<S> {
        self.data
    }

    /// Inner product.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[must_use]
    pub fn dot(&self, other: &Self) -> S {
        assert_eq!(self.len(), other.len());
        dot(&self.data, &other.data)
    }

    /// Sum of the squares of the entries.
    #[must_use]
    pub fn squared_norm(&self) -> S {
        dot(&self.data, &self.data)
    }

    /// `vᵀ·M·v`.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not `len × len`.
    #[must_use]
    pub fn quadratic_form(&self, matrix: &DenseMatrix<S>) -> S {
        assert_eq!(matrix.num_rows(), self.len());
        dot(&self.data, &matrix.mv(&self.data))
    }
}

impl<S> Index<usize> for DenseVector<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.data[index]
    }
}

impl<S> IndexMut<usize> for DenseVector<S> {
    fn index_mut(&mut self, index: usize) -> &mut S {
        &mut self.data[index]
    }
}

impl<S> FromIterator<S> for DenseVector<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        let v = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        let w: DenseVector<f64> = [4.0, 5.0, 6.0].into_iter().collect();
        // 1*4 + 2*5 + 3*6 = 32
        assert_eq!(v.dot(&w), 32.0);
        assert_eq!(v.squared_norm(), 14.0);
        assert_eq!(DenseVector::<f64>::zeros(4).len(), 4);
    }

    #[test]
    fn test_quadratic_form() {
        let m = DenseMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
        let mut v = DenseVector::zeros(2);
        v[0] = 1.0;
        v[1] = -1.0;
        // [1, -1] · [1, -2] = 3
        assert_eq!(v.quadratic_form(&m), 3.0);
        assert_eq!(m.mul_vector(&v).into_vec(), vec![1.0, -2.0]);
    }
}
