//! The error function and its complement.
//!
//! ```text
//! erf(x)  = (2/√π) ∫₀ˣ e^(-t²) dt
//! erfc(x) = 1 - erf(x)
//! ```
//!
//! Small and moderate arguments use the everywhere-positive series
//!
//! ```text
//! erf(a) = (2/√π) e^(-a²) Σ 2ⁿ a^(2n+1) / (1·3·5···(2n+1))
//! ```
//!
//! and large arguments the continued fraction
//!
//! ```text
//! erfc(a) = e^(-a²)/√π · 1/(a + (1/2)/(a + 1/(a + (3/2)/(a + ...))))
//! ```

use crate::float::{is_negative, log2_bound, Big, Kind, PrecFloat, EXPONENT_LIMIT};
use crate::transcendental::{Work, GUARD_BITS};

/// `erf(a)` for `a > 0` by the positive series.
fn erf_series(w: &Work, a: &Big) -> Big {
    let a2 = w.mul(a, a);
    let two_a2 = w.scale2(&a2, 1);
    let mut term = a.clone();
    let mut sum = a.clone();
    let mut n: i64 = 0;
    loop {
        n += 1;
        term = w.div(&w.mul(&term, &two_a2), &w.int(2 * n + 1));
        sum = w.add(&sum, &term);
        if term.repr().is_zero() || log2_bound(&term) < log2_bound(&sum) - w.bits as isize - 2 {
            break;
        }
    }
    let root_pi = w.sqrt(&w.pi());
    let gauss = w.exp(&-a2);
    w.div(&w.scale2(&w.mul(&sum, &gauss), 1), &root_pi)
}

/// `erfc(a)` for large `a > 0` by the continued fraction.
fn erfc_fraction(w: &Work, a: &Big, a_approx: f64) -> Big {
    let terms = (w.bits as f64 * std::f64::consts::LN_2 / a_approx).powi(2).ceil() as i64 + 32;
    let mut t = a.clone();
    for k in (1..=terms).rev() {
        let half_k = Big::from_parts(k.into(), -1);
        t = w.add(a, &w.div(&half_k, &t));
    }
    let gauss = w.exp(&-w.mul(a, a));
    w.div(&gauss, &w.mul(&w.sqrt(&w.pi()), &t))
}

/// Whether the continued fraction converges quickly at this precision.
fn use_fraction(a_approx: f64, bits: usize) -> bool {
    a_approx >= 2.0 && 4.0 * a_approx * a_approx >= bits as f64
}

/// `erfc(a)` for `a > 0`, or `None` when it underflows.
fn erfc_positive(a: &Big, a_approx: f64, bits: usize) -> Option<Big> {
    if a_approx * a_approx > EXPONENT_LIMIT as f64 * std::f64::consts::LN_2 {
        return None;
    }
    if use_fraction(a_approx, bits) {
        let w = Work::new(bits + GUARD_BITS);
        return Some(erfc_fraction(&w, a, a_approx));
    }
    // 1 - erf(a) cancels about a²·log2(e) leading bits.
    let lost = (a_approx * a_approx * std::f64::consts::LOG2_E).ceil() as usize;
    let w = Work::new(bits + lost + GUARD_BITS);
    Some(w.sub(&w.int(1), &erf_series(&w, a)))
}

fn magnitude(x: &Big) -> Big {
    if is_negative(x) {
        -x.clone()
    } else {
        x.clone()
    }
}

impl PrecFloat {
    /// The error function.
    #[must_use]
    pub fn erf(&self) -> Self {
        let p = self.precision;
        let x = match &self.kind {
            Kind::Nan => return Self::nan(p),
            Kind::PosInfinity => return p.one(),
            Kind::NegInfinity => return -p.one(),
            Kind::Finite(x) => x,
        };
        if x.repr().is_zero() {
            return Self::zero_at(p);
        }
        let a = magnitude(x);
        let a_approx = self.abs().to_f64();
        let w = Work::new(p.bits() + GUARD_BITS);
        let value = if use_fraction(a_approx, p.bits()) {
            // A vanishing complement still leaves erf strictly below one.
            let complement = erfc_positive(&a, a_approx, p.bits())
                .unwrap_or_else(|| Big::from_parts(1.into(), -(w.bits as isize) - 1));
            w.sub(&w.int(1), &complement)
        } else {
            erf_series(&w, &a)
        };
        Self::from_big(if is_negative(x) { -value } else { value }, p)
    }

    /// The complementary error function, accurate in relative terms far
    /// into the right tail.
    #[must_use]
    pub fn erfc(&self) -> Self {
        let p = self.precision;
        let x = match &self.kind {
            Kind::Nan => return Self::nan(p),
            Kind::PosInfinity => return Self::zero_at(p),
            Kind::NegInfinity => return p.from_i64(2),
            Kind::Finite(x) => x,
        };
        if x.repr().is_zero() {
            return p.one();
        }
        let a = magnitude(x);
        let a_approx = self.abs().to_f64();
        if is_negative(x) {
            // erfc(-a) = 1 + erf(a)
            let w = Work::new(p.bits() + GUARD_BITS);
            let erf = if use_fraction(a_approx, p.bits()) {
                let complement = erfc_positive(&a, a_approx, p.bits()).unwrap_or(Big::ZERO);
                w.sub(&w.int(1), &complement)
            } else {
                erf_series(&w, &a)
            };
            return Self::from_big(w.add(&w.int(1), &erf), p);
        }
        match erfc_positive(&a, a_approx, p.bits()) {
            Some(value) => Self::from_big(value, p),
            None => Self::zero_at(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PrecFloat, Precision};

    fn p(bits: usize) -> Precision {
        Precision::new(bits).unwrap()
    }

    #[test]
    fn test_erf_known_values() {
        let p = p(64);
        // erf(1) = 0.8427007929497148693...
        let erf1 = p.one().erf().to_f64();
        assert!((erf1 - 0.842_700_792_949_714_9).abs() < 2e-16);
        assert_eq!(p.zero().erf(), p.zero());
        assert_eq!(PrecFloat::infinity(p).erf(), p.one());
        assert_eq!(PrecFloat::neg_infinity(p).erfc().to_i64(), Some(2));
    }

    #[test]
    fn test_erf_is_odd() {
        let p = p(128);
        let x = p.from_f64(0.73);
        let sum = x.erf() + (-&x).erf();
        assert!(sum.abs() <= p.epsilon() * 4);
    }

    #[test]
    fn test_erf_plus_erfc_is_one() {
        let p = p(200);
        for value in [0.01, 0.5, 1.5, 3.0, 8.0, -2.0] {
            let x = p.from_f64(value);
            let total = x.erf() + x.erfc();
            assert!((total - p.one()).abs() <= p.epsilon() * 16, "x = {value}");
        }
    }

    #[test]
    fn test_erfc_tail_is_relative() {
        // erfc(10) = 2.088487583762544757...e-45
        let p = p(128);
        let tail = p.from_i64(10).erfc();
        let expected = 2.088_487_583_762_545e-45;
        assert!(((tail.to_f64() - expected) / expected).abs() < 1e-14);
        // erfc(30) = 2.5646562037561116e-393 is below the double range.
        let deep = p.from_i64(30).erfc();
        assert!(deep.is_positive());
        assert_eq!(p.from_f64(1e6).erfc(), p.zero());
    }

    #[test]
    fn test_erf_rounds_below_one() {
        let p = p(53);
        let near_one = p.from_i64(7).erf();
        assert!(near_one < p.one());
        assert!(near_one > p.one() - p.epsilon() * 2);
    }

    #[test]
    fn test_erfc_negative_argument() {
        let p = p(96);
        // erfc(-1) = 1 + erf(1)
        let value = p.from_i64(-1).erfc().to_f64();
        assert!((value - 1.842_700_792_949_715).abs() < 1e-15);
    }
}
