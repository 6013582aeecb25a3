//! Dense matrix representation.
//!
//! Entries are stored row-major. Elimination routines pivot on the entry of
//! largest magnitude.
//!
//! Kernels combine entries with binary operators, which take the larger
//! operand precision. Compound assignment keeps the target's precision and
//! accumulators start out at the default.

use std::cmp::Ordering;
use std::ops::{Add, Index, IndexMut, Sub};

use rand::Rng;
use rayon::prelude::*;

use crate::dense_vector::DenseVector;
use crate::traits::Scalar;

/// A dense matrix stored in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<S> {
    /// Row-major entries.
    data: Vec<S>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<S: Scalar> DenseMatrix<S> {
    /// Creates a zero matrix.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![S::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from row vectors.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<S>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        assert!(rows.iter().all(|row| row.len() == num_cols));
        Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`.
    #[must_use]
    pub fn from_fn(num_rows: usize, num_cols: usize, mut f: impl FnMut(usize, usize) -> S) -> Self {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { S::one() } else { S::zero() })
    }

    /// Creates a matrix with entries drawn uniformly from `[-1, 1)` at the
    /// precision of `like`.
    #[must_use]
    pub fn random<G: Rng>(num_rows: usize, num_cols: usize, rng: &mut G, like: &S) -> Self {
        Self::from_fn(num_rows, num_cols, |_, _| {
            S::from_f64_like(rng.gen_range(-1.0..1.0), like)
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns true if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[S] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<S> {
        (0..self.num_rows)
            .map(|row| self[(row, col)].clone())
            .collect()
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not have `num_cols` entries.
    #[must_use]
    pub fn mv(&self, x: &[S]) -> Vec<S> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| dot(self.row(row), x))
            .collect()
    }

    /// Matrix-vector multiply on a [`DenseVector`].
    #[must_use]
    pub fn mul_vector(&self, x: &DenseVector<S>) -> DenseVector<S> {
        DenseVector::from_vec(self.mv(x.as_slice()))
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);
        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                result[(i, j)] = self.product_entry(other, i, j);
            }
        }
        result
    }

    /// Matrix-matrix multiply with rows computed in parallel.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm_parallel(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);
        let data: Vec<S> = (0..self.num_rows)
            .into_par_iter()
            .flat_map_iter(|i| (0..other.num_cols).map(move |j| self.product_entry(other, i, j)))
            .collect();
        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }

    fn product_entry(&self, other: &Self, i: usize, j: usize) -> S {
        let mut sum = S::zero();
        for k in 0..self.num_cols {
            sum = sum + self[(i, k)].clone() * other[(k, j)].clone();
        }
        sum
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.num_cols, self.num_rows, |i, j| self[(j, i)].clone())
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: &S) -> Self {
        Self {
            data: self.data.iter().map(|v| v.clone() * scalar.clone()).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Sum of the squares of all entries.
    #[must_use]
    pub fn squared_norm(&self) -> S {
        dot(&self.data, &self.data)
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Subtracts a scaled row from another: row[target] -= factor * row[source].
    pub fn sub_scaled_row(&mut self, target: usize, source: usize, factor: &S) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * factor.clone();
            self[(target, k)] = self[(target, k)].clone() - val;
        }
    }

    /// Divides a row by a scalar.
    pub fn div_row(&mut self, row: usize, divisor: &S) {
        for k in 0..self.num_cols {
            self[(row, k)] = self[(row, k)].clone() / divisor.clone();
        }
    }

    /// Row index in `col` at or below `start` holding the entry of largest
    /// magnitude.
    fn pivot(&self, col: usize, start: usize) -> usize {
        (start..self.num_rows)
            .max_by(|&a, &b| {
                self[(a, col)]
                    .abs()
                    .partial_cmp(&self[(b, col)].abs())
                    .unwrap_or(Ordering::Equal)
            })
            .unwrap_or(start)
    }

    /// Computes the inverse by Gauss-Jordan elimination.
    ///
    /// Returns `None` if a pivot vanishes.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        assert!(self.is_square());
        let n = self.num_rows;
        let mut m = self.clone();
        let mut inv = Self::identity(n);

        for col in 0..n {
            let pivot_row = m.pivot(col, col);
            if m[(pivot_row, col)].is_zero() {
                return None;
            }
            m.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);

            let pivot = m[(col, col)].clone();
            m.div_row(col, &pivot);
            inv.div_row(col, &pivot);

            for row in 0..n {
                if row == col || m[(row, col)].is_zero() {
                    continue;
                }
                let factor = m[(row, col)].clone();
                m.sub_scaled_row(row, col, &factor);
                inv.sub_scaled_row(row, col, &factor);
            }
        }
        Some(inv)
    }

    /// Solves the square system Ax = b.
    ///
    /// Returns `None` if the matrix is singular.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square or `b` has the wrong length.
    #[must_use]
    pub fn solve(&self, b: &[S]) -> Option<Vec<S>> {
        assert!(self.is_square());
        assert_eq!(b.len(), self.num_rows);
        let n = self.num_rows;

        // Augmented matrix [A | b]
        let mut aug = Self::from_fn(n, n + 1, |i, j| {
            if j < n {
                self[(i, j)].clone()
            } else {
                b[i].clone()
            }
        });

        for col in 0..n {
            let pivot_row = aug.pivot(col, col);
            if aug[(pivot_row, col)].is_zero() {
                return None;
            }
            aug.swap_rows(col, pivot_row);
            for row in col + 1..n {
                if aug[(row, col)].is_zero() {
                    continue;
                }
                let factor = aug[(row, col)].clone() / aug[(col, col)].clone();
                aug.sub_scaled_row(row, col, &factor);
            }
        }

        let mut x = vec![S::zero(); n];
        for row in (0..n).rev() {
            let mut acc = aug[(row, n)].clone();
            for k in row + 1..n {
                acc = acc - aug[(row, k)].clone() * x[k].clone();
            }
            x[row] = acc / aug[(row, row)].clone();
        }
        Some(x)
    }

    /// Computes the determinant by elimination.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn det(&self) -> S {
        assert!(self.is_square());
        let n = self.num_rows;
        let mut m = self.clone();
        let mut det = S::one();

        for col in 0..n {
            let pivot_row = m.pivot(col, col);
            if m[(pivot_row, col)].is_zero() {
                return S::zero();
            }
            if pivot_row != col {
                m.swap_rows(col, pivot_row);
                det = -det;
            }
            let pivot = m[(col, col)].clone();
            for row in col + 1..n {
                if m[(row, col)].is_zero() {
                    continue;
                }
                let factor = m[(row, col)].clone() / pivot.clone();
                m.sub_scaled_row(row, col, &factor);
            }
            det = det * pivot;
        }
        det
    }
}

/// Plain dot product of two equal-length slices.
pub(crate) fn dot<S: Scalar>(a: &[S], b: &[S]) -> S {
    a.iter()
        .zip(b.iter())
        .fold(S::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
}

impl<S> Index<(usize, usize)> for DenseMatrix<S> {
    type Output = S;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<S> IndexMut<(usize, usize)> for DenseMatrix<S> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<S: Scalar> Add for &DenseMatrix<S> {
    type Output = DenseMatrix<S>;

    fn add(self, other: Self) -> DenseMatrix<S> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl<S: Scalar> Sub for &DenseMatrix<S> {
    type Output = DenseMatrix<S>;

    fn sub(self, other: Self) -> DenseMatrix<S> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.clone() - b.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiprec_float::Precision;

    fn m(rows: &[&[f64]]) -> DenseMatrix<f64> {
        DenseMatrix::from_rows(rows.iter().map(|row| row.to_vec()).collect())
    }

    #[test]
    fn test_zeros_and_identity() {
        let z: DenseMatrix<f64> = DenseMatrix::zeros(3, 4);
        assert_eq!((z.num_rows(), z.num_cols()), (3, 4));
        assert!(!z.is_square());
        assert_eq!(z.squared_norm(), 0.0);

        let id: DenseMatrix<f64> = DenseMatrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn test_mv() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        // [1*1 + 2*2 + 3*3, 4*1 + 5*2 + 6*3] = [14, 32]
        assert_eq!(a.mv(&[1.0, 2.0, 3.0]), vec![14.0, 32.0]);
        assert_eq!(a.col(1), vec![2.0, 5.0]);
    }

    #[test]
    fn test_mm() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        // [[1*5+2*7, 1*6+2*8], [3*5+4*7, 3*6+4*8]] = [[19, 22], [43, 50]]
        let c = a.mm(&b);
        assert_eq!(c, m(&[&[19.0, 22.0], &[43.0, 50.0]]));
        assert_eq!(a.mm_parallel(&b), c);
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!((t.num_rows(), t.num_cols()), (3, 2));
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t[(2, 1)], 6.0);
    }

    #[test]
    fn test_det() {
        // 3*6 - 8*4 = -14
        assert_eq!(m(&[&[3.0, 8.0], &[4.0, 6.0]]).det(), -14.0);
        // Requires a row swap.
        assert_eq!(m(&[&[0.0, 1.0], &[1.0, 0.0]]).det(), -1.0);
        assert_eq!(m(&[&[1.0, 2.0], &[2.0, 4.0]]).det(), 0.0);
    }

    #[test]
    fn test_inverse() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = a.inverse().unwrap();
        let residual = &a.mm(&inv) - &DenseMatrix::identity(2);
        assert!(residual.squared_norm() < 1e-30);
        assert!(m(&[&[1.0, 2.0], &[2.0, 4.0]]).inverse().is_none());
    }

    #[test]
    fn test_inverse_needs_pivoting() {
        let a = m(&[&[0.0, 1.0, 2.0], &[1.0, 0.0, 3.0], &[4.0, -3.0, 8.0]]);
        let inv = a.inverse().unwrap();
        let residual = &inv.mm(&a) - &DenseMatrix::identity(3);
        assert!(residual.squared_norm() < 1e-28);
    }

    #[test]
    fn test_solve() {
        // [[1, 2], [3, 4]] x = [5, 11] has x = [1, 2]
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let x = a.solve(&[5.0, 11.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-15);
        assert!((x[1] - 2.0).abs() < 1e-15);
        assert!(m(&[&[1.0, 1.0], &[1.0, 1.0]]).solve(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_add_sub_scale() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let twice = &a + &a;
        assert_eq!(twice, a.scale(&2.0));
        assert_eq!(&twice - &a, a);
    }

    #[test]
    fn test_precision_follows_entries() {
        let p = Precision::new(200).unwrap();
        let a = DenseMatrix::from_rows(vec![
            vec![p.from_i64(2), p.from_i64(1)],
            vec![p.from_i64(1), p.from_i64(3)],
        ]);
        let inv = a.inverse().unwrap();
        assert_eq!(inv[(0, 0)].precision(), p);
        // det = 5, inverse[0][0] = 3/5
        assert_eq!(a.det(), 5_i64);
        let expected = p.div(&p.from_i64(3), &p.from_i64(5));
        assert!((inv[(0, 0)].clone() - expected).abs() <= p.epsilon() * 8);
    }
}
