//! Integration tests for hiprec-linalg.

#[cfg(test)]
mod integration_tests {
    use hiprec_float::{PrecFloat, Precision};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::parallel::{multiply, parallel_dot, ParallelConfig};
    use crate::{DenseMatrix, PrecMatrix, PrecVector};

    fn random_system(n: usize, bits: usize, seed: u64) -> (Precision, PrecMatrix) {
        let p = Precision::new(bits).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (p, PrecMatrix::random(n, n, &mut rng, &p.zero()))
    }

    /// `n² · (eps · 2^32)²`
    fn residual_bound(p: Precision, n: usize) -> PrecFloat {
        let per_entry = p.epsilon() * (1i64 << 32);
        per_entry.sqr() * i64::try_from(n * n).unwrap()
    }

    #[test]
    fn test_random_inverse_is_two_sided() {
        let n = 12;
        let (p, m) = random_system(n, 256, 7);
        let inv = m.inverse().unwrap();
        let id = PrecMatrix::identity(n);

        let right = (&m.mm(&inv) - &id).squared_norm();
        let left = (&inv.mm(&m) - &id).squared_norm();
        let bound = residual_bound(p, n);
        assert!(right < bound, "right residual {right}");
        assert!(left < bound, "left residual {left}");
        assert_eq!(inv[(3, 5)].precision(), p);
    }

    #[test]
    fn test_high_precision_beats_double() {
        let n = 8;
        let (_, m53) = random_system(n, 53, 11);
        let (p, m) = random_system(n, 512, 11);
        let id = PrecMatrix::identity(n);
        let coarse = (&m53.mm(&m53.inverse().unwrap()) - &id).squared_norm();
        let fine = (&m.mm(&m.inverse().unwrap()) - &id).squared_norm();
        assert!(fine < coarse || coarse.is_zero());
        assert!(fine < residual_bound(p, n));
    }

    #[test]
    fn test_quadratic_form_of_inverse() {
        let n = 6;
        let (p, m) = random_system(n, 192, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let v = PrecVector::from_vec(PrecMatrix::random(n, 1, &mut rng, &p.zero()).col(0));

        // vᵀ·M⁻¹·v = v · solve(M, v)
        let via_inverse = v.quadratic_form(&m.inverse().unwrap());
        let via_solve = v.dot(&PrecVector::from_vec(m.solve(v.as_slice()).unwrap()));
        let scale = via_inverse.abs() + 1;
        assert!((via_inverse - via_solve).abs() < p.epsilon() * (1i64 << 32) * scale);
    }

    #[test]
    fn test_det_of_inverse() {
        let (p, m) = random_system(5, 160, 21);
        let product = m.det() * m.inverse().unwrap().det();
        assert!((product - 1).abs() < p.epsilon() * (1i64 << 24));
    }

    #[test]
    fn test_parallel_kernels_agree() {
        let (p, m) = random_system(10, 128, 99);
        let forced = ParallelConfig {
            parallel_threshold: 1, // Force parallel path for testing
        };
        let parallel = multiply(&m, &m, &forced);
        assert_eq!(parallel, m.mm(&m));
        let row = m.row(0);
        let seq = row.iter().fold(p.zero(), |acc, x| acc + x.clone() * x.clone());
        // The reduction order differs, so the rounding may too.
        let diff = (parallel_dot(row, row) - seq.clone()).abs();
        assert!(diff <= p.epsilon() * 16 * seq);
    }

    proptest! {
        #[test]
        fn prop_transpose_of_product(entries in prop::collection::vec(-8i32..8, 12)) {
            let a = DenseMatrix::from_fn(3, 4, |i, j| f64::from(entries[i * 4 + j]));
            let b = a.transpose();
            // (A·Aᵀ)ᵀ = A·Aᵀ holds exactly for small integers.
            let product = a.mm(&b);
            prop_assert_eq!(product.transpose(), product);
        }

        #[test]
        fn prop_dominant_matrix_inverts(entries in prop::collection::vec(-1.0f64..1.0, 9)) {
            let m = DenseMatrix::from_fn(3, 3, |i, j| {
                entries[i * 3 + j] + if i == j { 4.0 } else { 0.0 }
            });
            let inv = m.inverse().unwrap();
            let residual = (&m.mm(&inv) - &DenseMatrix::identity(3)).squared_norm();
            prop_assert!(residual < 1e-28);
        }
    }
}
