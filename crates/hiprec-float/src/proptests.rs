//! Property-based tests for directed rounding and the elementary functions.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use proptest::prelude::*;

    use crate::{Notation, PrecFloat, Precision};

    // Strategy for finite doubles of moderate magnitude
    fn moderate() -> impl Strategy<Value = f64> {
        -1.0e6f64..1.0e6f64
    }

    fn precision() -> impl Strategy<Value = Precision> {
        (8usize..400).prop_map(|bits| Precision::new(bits).unwrap())
    }

    proptest! {
        #[test]
        fn rounding_never_exceeds_exact_sum(a in moderate(), b in moderate(), p in precision()) {
            let wide = Precision::new(2200).unwrap();
            let exact = wide.from_f64(a) + wide.from_f64(b);
            let rounded = p.add(&wide.from_f64(a), &wide.from_f64(b));
            prop_assert!(rounded <= exact);
            prop_assert!((exact - &rounded).abs() <= rounded.abs() * p.epsilon() * 2 + p.epsilon());
        }

        #[test]
        fn additive_inverse_and_unit_are_exact(
            x in prop_oneof![moderate(), -1.0e300f64..1.0e300, -1.0e-300f64..1.0e-300],
            bits in 1usize..2048
        ) {
            let p = Precision::new(bits).unwrap();
            let a = p.from_f64(x);
            prop_assert_eq!(&a + &(-&a), 0_i64);
            prop_assert_eq!(&a * &p.one(), a.clone());
            let two_pow_bits = PrecFloat::from_ibig_at(IBig::ONE << bits, p);
            prop_assert_eq!(p.epsilon() * two_pow_bits, 1_i64);
        }

        #[test]
        fn product_rounds_down(a in moderate(), b in moderate(), p in precision()) {
            let wide = Precision::new(2200).unwrap();
            let exact = wide.from_f64(a) * wide.from_f64(b);
            let rounded = p.mul(&wide.from_f64(a), &wide.from_f64(b));
            prop_assert!(rounded <= exact);
        }

        #[test]
        fn quotient_rounds_down(a in moderate(), b in 1.0f64..1.0e6, p in precision()) {
            let q = p.div(&Precision::DOUBLE.from_f64(a), &Precision::DOUBLE.from_f64(b));
            let back = Precision::new(2200).unwrap().mul(&q, &Precision::DOUBLE.from_f64(b));
            prop_assert!(back <= a);
        }

        #[test]
        fn comparisons_match_f64(a in moderate(), b in moderate()) {
            let p = Precision::new(80).unwrap();
            prop_assert_eq!(p.from_f64(a) < p.from_f64(b), a < b);
            prop_assert_eq!(p.from_f64(a) == p.from_f64(b), a == b);
        }

        #[test]
        fn exp_ln_inverse(x in -50.0f64..50.0) {
            let p = Precision::new(160).unwrap();
            let v = p.from_f64(x);
            let back = v.exp().ln();
            prop_assert!((back - &v).abs() <= p.epsilon() * 256);
        }

        #[test]
        fn sqrt_squared_is_below(x in 0.0f64..1.0e12) {
            let p = Precision::new(120).unwrap();
            let v = p.from_f64(x);
            prop_assert!(v.sqrt().sqr() <= v);
        }

        #[test]
        fn sin_cos_pythagoras(x in -100.0f64..100.0) {
            let p = Precision::new(128).unwrap();
            let (s, c) = p.from_f64(x).sin_cos();
            prop_assert!((s.sqr() + c.sqr() - p.one()).abs() <= p.epsilon() * 16);
        }

        #[test]
        fn erf_is_bounded(x in -8.0f64..8.0) {
            let p = Precision::new(96).unwrap();
            let e = p.from_f64(x).erf();
            prop_assert!(e >= -1 && e <= 1);
            prop_assert!((e + p.from_f64(x).erfc() - p.one()).abs() <= p.epsilon() * 16);
        }

        #[test]
        fn decimal_text_parses_back(x in moderate()) {
            let p = Precision::new(53).unwrap();
            let v = p.from_f64(x);
            let text = v.to_string_with(20, Notation::Scientific);
            let back = PrecFloat::parse_at(&text, Precision::new(53).unwrap()).unwrap();
            prop_assert!((back - &v).abs() <= v.abs() * p.epsilon() * 2);
        }
    }
}
