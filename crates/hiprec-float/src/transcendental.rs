//! Elementary functions.
//!
//! `exp`, `ln`, `sqrt` and `pow` are evaluated by `dashu` directly in the
//! target precision. The trigonometric, hyperbolic and inverse
//! trigonometric functions are evaluated by series in a wider working
//! precision and rounded toward negative infinity into the precision of
//! the argument.

use std::cell::RefCell;

use dashu::float::Context;
use dashu::integer::IBig;

use crate::error::FloatError;
use crate::float::{
    floor, integer_value, is_negative, log2_bound, Big, Kind, PrecFloat, RoundDown, EXPONENT_LIMIT,
};
use crate::precision::Precision;

/// Extra bits carried by series evaluations.
pub(crate) const GUARD_BITS: usize = 32;

/// `exp(x)` overflows for `x` above `EXPONENT_LIMIT * ln 2`.
const EXP_OVERFLOW: f64 = EXPONENT_LIMIT as f64 * std::f64::consts::LN_2;

/// Arithmetic on raw binary floats at a fixed working precision.
pub(crate) struct Work {
    pub(crate) bits: usize,
    ctx: Context<RoundDown>,
}

impl Work {
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            bits,
            ctx: Context::new(bits),
        }
    }

    pub(crate) fn int(&self, n: i64) -> Big {
        Big::from_parts(IBig::from(n), 0)
    }

    pub(crate) fn add(&self, a: &Big, b: &Big) -> Big {
        self.ctx.add(a.repr(), b.repr()).value()
    }

    pub(crate) fn sub(&self, a: &Big, b: &Big) -> Big {
        self.ctx.sub(a.repr(), b.repr()).value()
    }

    pub(crate) fn mul(&self, a: &Big, b: &Big) -> Big {
        self.ctx.mul(a.repr(), b.repr()).value()
    }

    /// Callers guarantee a non-zero divisor.
    pub(crate) fn div(&self, a: &Big, b: &Big) -> Big {
        self.ctx.div(a.repr(), b.repr()).value()
    }

    pub(crate) fn sqrt(&self, a: &Big) -> Big {
        self.ctx.sqrt(a.repr()).value()
    }

    pub(crate) fn exp(&self, a: &Big) -> Big {
        self.ctx.exp(a.repr()).value()
    }

    /// Multiplies by `2^k` exactly.
    pub(crate) fn scale2(&self, a: &Big, k: isize) -> Big {
        self.mul(a, &Big::from_parts(IBig::ONE, k))
    }

    pub(crate) fn pi(&self) -> Big {
        pi_fixed(self.bits + GUARD_BITS)
    }
}

thread_local! {
    static PI_CACHE: RefCell<Option<(usize, IBig)>> = RefCell::new(None);
}

/// Returns π with an absolute error below `2^(16 - bits)`.
fn pi_fixed(bits: usize) -> Big {
    let scaled = PI_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        match cache.as_ref() {
            Some((cached_bits, value)) if *cached_bits >= bits => {
                value.clone() >> (cached_bits - bits)
            }
            _ => {
                let value = machin(bits);
                *cache = Some((bits, value.clone()));
                value
            }
        }
    });
    Big::from_parts(scaled, -isize::try_from(bits).unwrap_or(isize::MAX))
}

/// `π * 2^bits` by Machin's formula `16 atan(1/5) - 4 atan(1/239)`.
fn machin(bits: usize) -> IBig {
    IBig::from(16) * atan_inverse(5, bits) - IBig::from(4) * atan_inverse(239, bits)
}

/// `atan(1/n) * 2^bits` in fixed point.
fn atan_inverse(n: i64, bits: usize) -> IBig {
    let n = IBig::from(n);
    let n_squared = &n * &n;
    let mut power = (IBig::ONE << bits) / &n;
    let mut sum = power.clone();
    let mut k: i64 = 1;
    loop {
        power = power / &n_squared;
        if power == IBig::ZERO {
            break;
        }
        let term = &power / IBig::from(2 * k + 1);
        sum = if k % 2 == 1 { sum - term } else { sum + term };
        k += 1;
    }
    sum
}

/// `sin` of a reduced argument.
fn sin_series(w: &Work, r: &Big) -> Big {
    if r.repr().is_zero() {
        return Big::ZERO;
    }
    let r2 = w.mul(r, r);
    let negligible = log2_bound(r) - w.bits as isize - 2;
    let mut term = r.clone();
    let mut sum = r.clone();
    let mut k: i64 = 1;
    loop {
        term = w.div(&w.mul(&term, &r2), &w.int(-(2 * k) * (2 * k + 1)));
        if term.repr().is_zero() || log2_bound(&term) < negligible {
            break;
        }
        sum = w.add(&sum, &term);
        k += 1;
    }
    sum
}

/// `cos` of a reduced argument.
fn cos_series(w: &Work, r: &Big) -> Big {
    let one = w.int(1);
    if r.repr().is_zero() {
        return one;
    }
    let r2 = w.mul(r, r);
    let negligible = -(w.bits as isize) - 2;
    let mut term = one.clone();
    let mut sum = one;
    let mut k: i64 = 1;
    loop {
        term = w.div(&w.mul(&term, &r2), &w.int(-(2 * k - 1) * (2 * k)));
        if term.repr().is_zero() || log2_bound(&term) < negligible {
            break;
        }
        sum = w.add(&sum, &term);
        k += 1;
    }
    sum
}

/// Splits `x = k·π/2 + r` with `|r| <= π/4`, retrying with more bits
/// when `r` suffers cancellation. Returns `k mod 4` and `r`.
fn reduce_quarter_turns(x: &Big, bits: usize) -> (u8, Big) {
    let magnitude = log2_bound(x).max(0).unsigned_abs();
    let mut extra = 0;
    for _ in 0..4 {
        let w = Work::new(bits + magnitude + extra + GUARD_BITS);
        let half_pi = w.scale2(&w.pi(), -1);
        let quotient = w.div(x, &half_pi);
        let k = floor(&w.add(&quotient, &Big::from_parts(IBig::ONE, -1)));
        let r = w.sub(x, &w.mul(&Big::from_parts(k.clone(), 0), &half_pi));
        let lost = if r.repr().is_zero() {
            bits
        } else {
            (-log2_bound(&r)).max(0).unsigned_abs()
        };
        if lost > extra + GUARD_BITS / 2 && extra < 8 * bits {
            extra += lost + GUARD_BITS;
            continue;
        }
        let quadrant = (k % IBig::from(4) + IBig::from(4)) % IBig::from(4);
        let quadrant = u8::try_from(quadrant).unwrap_or(0);
        return (quadrant, r);
    }
    (0, x.clone())
}

fn magnitude_of(x: &Big) -> Big {
    if is_negative(x) {
        -x.clone()
    } else {
        x.clone()
    }
}

/// Rough `log2|x|`, exact enough to detect exponent overflow.
fn approx_log2(x: &PrecFloat) -> f64 {
    match x.finite() {
        Some(big) if (-1000..1000).contains(&log2_bound(big)) => x.abs().to_f64().log2(),
        Some(big) => log2_bound(big) as f64,
        None => f64::INFINITY,
    }
}

/// `atan(y)` for any finite `y`.
fn atan_big(w: &Work, y: &Big) -> Big {
    if y.repr().is_zero() {
        return Big::ZERO;
    }
    let one = w.int(1);
    if magnitude_of(y) > one {
        // atan(y) = ±π/2 - atan(1/y)
        let half_pi = w.scale2(&w.pi(), -1);
        let inner = atan_big(w, &w.div(&one, y));
        return if is_negative(y) {
            w.sub(&(-half_pi), &inner)
        } else {
            w.sub(&half_pi, &inner)
        };
    }
    let mut y = y.clone();
    let mut doublings: isize = 0;
    while log2_bound(&y) > -10 {
        let root = w.sqrt(&w.add(&one, &w.mul(&y, &y)));
        y = w.div(&y, &w.add(&one, &root));
        doublings += 1;
    }
    let y2 = w.mul(&y, &y);
    let negligible = log2_bound(&y) - w.bits as isize - 2;
    let mut power = y.clone();
    let mut sum = y;
    let mut k: i64 = 1;
    loop {
        power = -w.mul(&power, &y2);
        let term = w.div(&power, &w.int(2 * k + 1));
        if term.repr().is_zero() || log2_bound(&term) < negligible {
            break;
        }
        sum = w.add(&sum, &term);
        k += 1;
    }
    w.scale2(&sum, doublings)
}

impl PrecFloat {
    /// π at the given precision, rounded toward negative infinity.
    #[must_use]
    pub fn pi(precision: Precision) -> Self {
        Self::from_big(pi_fixed(precision.bits() + GUARD_BITS), precision)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// `self * self`.
    #[must_use]
    pub fn sqr(&self) -> Self {
        self.mul_at(self, self.precision)
    }

    /// `1 / self`.
    #[must_use]
    pub fn recip(&self) -> Self {
        Self::exact_int(1).div_at(self, self.precision)
    }

    /// Square root; NaN for negative arguments.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        let p = self.precision;
        match &self.kind {
            Kind::Nan | Kind::NegInfinity => Self::nan(p),
            Kind::PosInfinity => Self::infinity(p),
            Kind::Finite(x) if is_negative(x) => Self::nan(p),
            Kind::Finite(x) if x.repr().is_zero() => Self::zero_at(p),
            Kind::Finite(x) => Self::from_big(p.context().sqrt(x.repr()).value(), p),
        }
    }

    /// `e^self`.
    #[must_use]
    pub fn exp(&self) -> Self {
        let p = self.precision;
        match &self.kind {
            Kind::Nan => Self::nan(p),
            Kind::PosInfinity => Self::infinity(p),
            Kind::NegInfinity => Self::zero_at(p),
            Kind::Finite(x) if x.repr().is_zero() => p.one(),
            Kind::Finite(x) => {
                let approx = self.to_f64();
                if approx > EXP_OVERFLOW {
                    Self::infinity(p)
                } else if approx < -EXP_OVERFLOW {
                    Self::zero_at(p)
                } else {
                    Self::from_big(p.context().exp(x.repr()).value(), p)
                }
            }
        }
    }

    /// Natural logarithm; `-∞` at zero and NaN for negative arguments.
    #[must_use]
    pub fn ln(&self) -> Self {
        let p = self.precision;
        match &self.kind {
            Kind::Nan | Kind::NegInfinity => Self::nan(p),
            Kind::PosInfinity => Self::infinity(p),
            Kind::Finite(x) if x.repr().is_zero() => Self::neg_infinity(p),
            Kind::Finite(x) if is_negative(x) => Self::nan(p),
            Kind::Finite(_) if *self == 1 => Self::zero_at(p),
            Kind::Finite(x) => Self::from_big(p.context().ln(x.repr()).value(), p),
        }
    }

    /// Alias of [`PrecFloat::ln`].
    #[must_use]
    pub fn log(&self) -> Self {
        self.ln()
    }

    /// `self^exponent` for an integer exponent.
    #[must_use]
    pub fn powi(&self, exponent: i64) -> Self {
        self.pow(&Self::exact_int(exponent).round_to(self.precision))
    }

    /// `self^exponent`, at the larger of the two precisions.
    ///
    /// Negative bases are accepted for integer exponents only.
    #[must_use]
    pub fn pow(&self, exponent: &Self) -> Self {
        let p = self.precision.max(exponent.precision);
        let (Kind::Finite(x), Kind::Finite(y)) = (&self.kind, &exponent.kind) else {
            return self.pow_special(exponent, p);
        };
        if y.repr().is_zero() || self == &Self::exact_int(1) {
            return p.one();
        }
        if x.repr().is_zero() {
            return if is_negative(y) {
                Self::infinity(p)
            } else {
                Self::zero_at(p)
            };
        }
        // Saturate before handing huge results to dashu.
        let log2_result = approx_log2(self) * exponent.to_f64();
        if log2_result.is_finite() && log2_result > EXPONENT_LIMIT as f64 {
            let odd = integer_value(y).is_some_and(|n| n % IBig::from(2) != IBig::ZERO);
            return Self::signed_infinity(is_negative(x) && odd, p);
        }
        if log2_result.is_finite() && log2_result < -(EXPONENT_LIMIT as f64) {
            return Self::zero_at(p);
        }
        let ctx = p.context();
        match integer_value(y) {
            Some(n) => Self::from_big(ctx.powi(x.repr(), n).value(), p),
            None if is_negative(x) => Self::nan(p),
            None => Self::from_big(ctx.powf(x.repr(), y.repr()).value(), p),
        }
    }

    fn pow_special(&self, exponent: &Self, p: Precision) -> Self {
        if exponent.is_zero() {
            return p.one();
        }
        if self.is_nan() || exponent.is_nan() {
            return Self::nan(p);
        }
        if exponent.is_infinite() {
            let magnitude = self.abs();
            let one = Self::exact_int(1);
            return match magnitude.partial_cmp(&one) {
                Some(std::cmp::Ordering::Equal) => p.one(),
                Some(std::cmp::Ordering::Greater) if exponent.is_positive() => Self::infinity(p),
                Some(std::cmp::Ordering::Less) if exponent.is_negative() => Self::infinity(p),
                _ => Self::zero_at(p),
            };
        }
        // The base is infinite and the exponent finite and non-zero.
        let odd = exponent
            .finite()
            .and_then(integer_value)
            .is_some_and(|n| n % IBig::from(2) != IBig::ZERO);
        if exponent.is_negative() {
            Self::zero_at(p)
        } else {
            Self::signed_infinity(self.is_negative() && odd, p)
        }
    }

    /// Hyperbolic sine and cosine from a single exponential.
    #[must_use]
    pub fn sinh_cosh(&self) -> (Self, Self) {
        let p = self.precision;
        let x = match &self.kind {
            Kind::Nan => return (Self::nan(p), Self::nan(p)),
            Kind::PosInfinity => return (Self::infinity(p), Self::infinity(p)),
            Kind::NegInfinity => return (Self::neg_infinity(p), Self::infinity(p)),
            Kind::Finite(x) => x,
        };
        if x.repr().is_zero() {
            return (Self::zero_at(p), p.one());
        }
        let magnitude = log2_bound(x);
        if magnitude < -(p.bits() as isize) - 8 {
            // sinh(x) = x(1 + x²/6 + ...), cosh(x) = 1 + x²/2 + ...
            let w = Work::new(p.bits() + GUARD_BITS);
            let cube = w.div(&w.mul(x, &w.mul(x, x)), &w.int(6));
            return (
                Self::from_big(w.add(x, &cube), p),
                Self::from_big(w.add(&w.int(1), &w.scale2(&w.mul(x, x), -1)), p),
            );
        }
        if self.abs().to_f64() > EXP_OVERFLOW {
            return (
                Self::signed_infinity(is_negative(x), p),
                Self::infinity(p),
            );
        }
        let extra = (-magnitude).max(0).unsigned_abs();
        let w = Work::new(p.bits() + GUARD_BITS + extra);
        let e = w.exp(&magnitude_of(x));
        let e_inv = w.div(&w.int(1), &e);
        let sinh = w.scale2(&w.sub(&e, &e_inv), -1);
        let cosh = w.scale2(&w.add(&e, &e_inv), -1);
        let sinh = if is_negative(x) { -sinh } else { sinh };
        (Self::from_big(sinh, p), Self::from_big(cosh, p))
    }

    /// Hyperbolic sine.
    #[must_use]
    pub fn sinh(&self) -> Self {
        self.sinh_cosh().0
    }

    /// Hyperbolic cosine.
    #[must_use]
    pub fn cosh(&self) -> Self {
        self.sinh_cosh().1
    }

    /// Sine and cosine sharing one argument reduction.
    #[must_use]
    pub fn sin_cos(&self) -> (Self, Self) {
        let p = self.precision;
        let Some(x) = self.finite() else {
            return (Self::nan(p), Self::nan(p));
        };
        if x.repr().is_zero() {
            return (Self::zero_at(p), p.one());
        }
        let (quadrant, r) = reduce_quarter_turns(x, p.bits());
        let w = Work::new(p.bits() + GUARD_BITS);
        let s = sin_series(&w, &r);
        let c = cos_series(&w, &r);
        let (sin, cos) = match quadrant {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        };
        (Self::from_big(sin, p), Self::from_big(cos, p))
    }

    /// Sine.
    #[must_use]
    pub fn sin(&self) -> Self {
        self.sin_cos().0
    }

    /// Cosine.
    #[must_use]
    pub fn cos(&self) -> Self {
        self.sin_cos().1
    }

    /// Arc tangent.
    #[must_use]
    pub fn atan(&self) -> Self {
        let p = self.precision;
        match &self.kind {
            Kind::Nan => Self::nan(p),
            Kind::PosInfinity | Kind::NegInfinity => {
                let w = Work::new(p.bits() + GUARD_BITS);
                let half_pi = w.scale2(&w.pi(), -1);
                Self::from_big(if self.is_negative() { -half_pi } else { half_pi }, p)
            }
            Kind::Finite(y) => {
                let w = Work::new(p.bits() + GUARD_BITS);
                Self::from_big(atan_big(&w, y), p)
            }
        }
    }

    /// Arc sine; NaN outside `[-1, 1]`.
    #[must_use]
    pub fn asin(&self) -> Self {
        let p = self.precision;
        let Some(x) = self.finite() else {
            return Self::nan(p);
        };
        let w = Work::new(p.bits() + GUARD_BITS);
        let one = w.int(1);
        if magnitude_of(x) > one {
            return Self::nan(p);
        }
        if x.repr().is_zero() {
            return Self::zero_at(p);
        }
        if magnitude_of(x) == one {
            let half_pi = w.scale2(&w.pi(), -1);
            return Self::from_big(if is_negative(x) { -half_pi } else { half_pi }, p);
        }
        // asin(x) = atan(x / sqrt((1 - x)(1 + x)))
        let cosine = w.sqrt(&w.mul(&w.sub(&one, x), &w.add(&one, x)));
        Self::from_big(atan_big(&w, &w.div(x, &cosine)), p)
    }

    /// Arc cosine; NaN outside `[-1, 1]`.
    #[must_use]
    pub fn acos(&self) -> Self {
        let p = self.precision;
        let Some(x) = self.finite() else {
            return Self::nan(p);
        };
        let w = Work::new(p.bits() + GUARD_BITS);
        let one = w.int(1);
        if magnitude_of(x) > one {
            return Self::nan(p);
        }
        if *x == one {
            return Self::zero_at(p);
        }
        if *x == -one.clone() {
            return Self::from_big(w.pi(), p);
        }
        // acos(x) = 2 atan(sqrt((1 - x) / (1 + x)))
        let ratio = w.sqrt(&w.div(&w.sub(&one, x), &w.add(&one, x)));
        Self::from_big(w.scale2(&atan_big(&w, &ratio), 1), p)
    }

    /// [`PrecFloat::div_at`] that reports a division by zero instead of
    /// returning an infinity.
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] when finite operands give a
    /// non-finite quotient.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, FloatError> {
        strict("div", self.is_finite() && rhs.is_finite(), self / rhs)
    }

    /// Strict [`PrecFloat::ln`].
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] for zero and negative arguments.
    pub fn checked_ln(&self) -> Result<Self, FloatError> {
        strict("ln", self.is_finite(), self.ln())
    }

    /// Strict [`PrecFloat::sqrt`].
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] for negative arguments.
    pub fn checked_sqrt(&self) -> Result<Self, FloatError> {
        strict("sqrt", self.is_finite(), self.sqrt())
    }

    /// Strict [`PrecFloat::asin`].
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] outside `[-1, 1]`.
    pub fn checked_asin(&self) -> Result<Self, FloatError> {
        strict("asin", self.is_finite(), self.asin())
    }

    /// Strict [`PrecFloat::acos`].
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] outside `[-1, 1]`.
    pub fn checked_acos(&self) -> Result<Self, FloatError> {
        strict("acos", self.is_finite(), self.acos())
    }

    /// Strict [`PrecFloat::pow`].
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Domain`] for negative bases with fractional
    /// exponents and for zero raised to a negative power.
    pub fn checked_pow(&self, exponent: &Self) -> Result<Self, FloatError> {
        strict("pow", self.is_finite() && exponent.is_finite(), self.pow(exponent))
    }

    /// Fails with [`FloatError::NonFinite`] on infinities and NaN.
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is finite.
    pub fn into_finite(self) -> Result<Self, FloatError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(FloatError::NonFinite)
        }
    }
}

fn strict(operation: &'static str, finite_inputs: bool, out: PrecFloat) -> Result<PrecFloat, FloatError> {
    if finite_inputs && !out.is_finite() {
        Err(FloatError::Domain { operation })
    } else {
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_50: &str = "3.14159265358979323846264338327950288419716939937510";

    fn p(bits: usize) -> Precision {
        Precision::new(bits).unwrap()
    }

    fn close(a: &PrecFloat, b: &PrecFloat, ulps: i64) -> bool {
        let scale = if a.abs() > 1 { a.abs() } else { a.precision().one() };
        let tolerance = scale * a.precision().epsilon() * ulps;
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_pi_digits() {
        let pi = PrecFloat::pi(p(200));
        assert!(pi.to_string_with(50, crate::Notation::Fixed).starts_with(&PI_50[..50]));
        assert_eq!(PrecFloat::pi(p(53)).to_f64(), std::f64::consts::PI);
    }

    #[test]
    fn test_pi_rounds_down() {
        let high = PrecFloat::pi(p(400));
        for bits in [10, 64, 129, 300] {
            assert!(PrecFloat::pi(p(bits)) <= high);
        }
    }

    #[test]
    fn test_exp_ln() {
        let p = p(256);
        let x = p.from_f64(2.75);
        assert!(close(&x.exp().ln(), &x, 8));
        assert_eq!(p.zero().exp(), p.one());
        assert_eq!(p.one().ln(), p.zero());
        assert!(p.zero().ln().is_infinite());
        assert!(p.from_i64(-1).ln().is_nan());
    }

    #[test]
    fn test_exp_saturates() {
        let p = p(64);
        assert!(p.from_f64(1e12).exp().is_infinite());
        assert!(p.from_f64(-1e12).exp().is_zero());
    }

    #[test]
    fn test_sqrt() {
        let p = p(128);
        assert_eq!(p.from_i64(144).sqrt().to_i64(), Some(12));
        let two = p.from_i64(2);
        let root = two.sqrt();
        assert!(root.sqr() <= two);
        assert!(p.from_i64(-4).sqrt().is_nan());
    }

    #[test]
    fn test_sin_cos_identity() {
        let p = p(192);
        for value in [0.1, 1.0, -2.5, 10.0, 1000.0] {
            let (s, c) = p.from_f64(value).sin_cos();
            assert!(close(&(s.sqr() + c.sqr()), &p.one(), 16), "x = {value}");
        }
    }

    #[test]
    fn test_sin_values() {
        let p = p(64);
        assert!((p.from_f64(0.5).sin().to_f64() - 0.5f64.sin()).abs() < 1e-15);
        assert!((p.from_f64(4.0).cos().to_f64() - 4.0f64.cos()).abs() < 1e-15);
        let half_pi = PrecFloat::pi(p) / 2;
        assert!(close(&half_pi.sin(), &p.one(), 4));
    }

    #[test]
    fn test_hyperbolic() {
        let p = p(128);
        for value in [1e-30, 0.001, 0.7, -3.0, 40.0] {
            let (s, c) = p.from_f64(value).sinh_cosh();
            // cosh² - sinh² = 1
            assert!(close(&(c.sqr() - s.sqr()), &p.one(), 64), "x = {value}");
            assert!((s.to_f64() - value.sinh()).abs() <= 1e-14 * value.sinh().abs());
        }
    }

    #[test]
    fn test_inverse_trig() {
        let p = p(160);
        for value in [0.0, 0.3, -0.9, 0.999_999] {
            let x = p.from_f64(value);
            assert!(close(&x.asin().sin(), &x, 1 << 24), "x = {value}");
            assert!(close(&x.acos().cos(), &x, 1 << 24), "x = {value}");
        }
        assert!(close(&p.one().asin(), &(PrecFloat::pi(p) / 2), 2));
        assert!(close(&p.from_i64(-1).acos(), &PrecFloat::pi(p), 2));
        assert!(p.from_f64(1.5).asin().is_nan());
        assert!(p.from_f64(-1.5).acos().is_nan());
        assert!(close(&p.one().atan(), &(PrecFloat::pi(p) / 4), 4));
    }

    #[test]
    fn test_pow() {
        let p = p(128);
        let two = p.from_i64(2);
        assert_eq!(two.pow(&p.from_i64(10)).to_i64(), Some(1024));
        assert_eq!(p.from_i64(-2).powi(3).to_i64(), Some(-8));
        assert!(close(&p.from_i64(9).pow(&p.from_f64(0.5)), &p.from_i64(3), 4));
        assert!(p.from_i64(-2).pow(&p.from_f64(0.5)).is_nan());
        assert!(p.zero().pow(&p.from_i64(-1)).is_infinite());
        assert_eq!(p.zero().pow(&p.zero()), p.one());
        assert!(two.pow(&p.from_f64(1e12)).is_infinite());
        assert!(two.pow(&PrecFloat::neg_infinity(p)).is_zero());
    }

    #[test]
    fn test_strict_mode() {
        let p = p(64);
        assert_eq!(
            p.from_f64(2.0).checked_asin(),
            Err(FloatError::Domain { operation: "asin" })
        );
        assert!(p.one().checked_div(&p.zero()).is_err());
        assert!(p.zero().checked_ln().is_err());
        assert!(p.from_i64(-1).checked_sqrt().is_err());
        assert!(p.from_f64(0.25).checked_sqrt().is_ok());
        assert_eq!(PrecFloat::nan(p).into_finite(), Err(FloatError::NonFinite));
    }
}
