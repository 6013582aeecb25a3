//! Numeric backends.
//!
//! Algorithms that run both in arbitrary precision and in native double
//! precision are written against [`Backend`], which constructs values, and
//! [`Real`], which computes with them. [`Precision`] is the arbitrary
//! precision backend; [`Native`] is plain `f64`.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::float::PrecFloat;
use crate::precision::Precision;

/// A real number type usable by generic numerical code.
pub trait Real:
    Clone
    + Debug
    + Display
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
{
    /// Absolute value.
    #[must_use]
    fn abs(&self) -> Self;

    /// Square root.
    #[must_use]
    fn sqrt(&self) -> Self;

    /// `e^self`.
    #[must_use]
    fn exp(&self) -> Self;

    /// Natural logarithm.
    #[must_use]
    fn ln(&self) -> Self;

    /// `1 / self`.
    #[must_use]
    fn recip(&self) -> Self;

    /// Hyperbolic sine and cosine.
    #[must_use]
    fn sinh_cosh(&self) -> (Self, Self);

    /// Error function.
    #[must_use]
    fn erf(&self) -> Self;

    /// Complementary error function.
    #[must_use]
    fn erfc(&self) -> Self;

    /// Multiplies by a small integer.
    #[must_use]
    fn mul_int(&self, n: i64) -> Self;

    /// Whether the value is neither infinite nor NaN.
    fn is_finite(&self) -> bool;

    /// Whether the value is exactly zero.
    fn is_zero(&self) -> bool;

    /// Nearest double below the value.
    fn to_f64(&self) -> f64;
}

/// Constructs [`Real`] values at a fixed precision.
pub trait Backend: Copy + Debug + Send + Sync {
    /// The value type.
    type Real: Real;

    /// Significand bits.
    fn bits(self) -> usize;

    /// Meaningful decimal digits.
    fn digits(self) -> usize;

    /// `2^-bits`.
    fn epsilon(self) -> Self::Real;

    /// Converts a double.
    fn from_f64(self, value: f64) -> Self::Real;

    /// Converts an integer.
    fn from_i64(self, value: i64) -> Self::Real;

    /// π.
    fn pi(self) -> Self::Real;

    /// Zero.
    fn zero(self) -> Self::Real {
        self.from_i64(0)
    }

    /// One.
    fn one(self) -> Self::Real {
        self.from_i64(1)
    }
}

impl Real for PrecFloat {
    fn abs(&self) -> Self {
        PrecFloat::abs(self)
    }

    fn sqrt(&self) -> Self {
        PrecFloat::sqrt(self)
    }

    fn exp(&self) -> Self {
        PrecFloat::exp(self)
    }

    fn ln(&self) -> Self {
        PrecFloat::ln(self)
    }

    fn recip(&self) -> Self {
        PrecFloat::recip(self)
    }

    fn sinh_cosh(&self) -> (Self, Self) {
        PrecFloat::sinh_cosh(self)
    }

    fn erf(&self) -> Self {
        PrecFloat::erf(self)
    }

    fn erfc(&self) -> Self {
        PrecFloat::erfc(self)
    }

    fn mul_int(&self, n: i64) -> Self {
        self * n
    }

    fn is_finite(&self) -> bool {
        PrecFloat::is_finite(self)
    }

    fn is_zero(&self) -> bool {
        PrecFloat::is_zero(self)
    }

    fn to_f64(&self) -> f64 {
        PrecFloat::to_f64(self)
    }
}

impl Backend for Precision {
    type Real = PrecFloat;

    fn bits(self) -> usize {
        Precision::bits(self)
    }

    fn digits(self) -> usize {
        Precision::digits(self)
    }

    fn epsilon(self) -> PrecFloat {
        Precision::epsilon(self)
    }

    fn from_f64(self, value: f64) -> PrecFloat {
        Precision::from_f64(self, value)
    }

    fn from_i64(self, value: i64) -> PrecFloat {
        Precision::from_i64(self, value)
    }

    fn pi(self) -> PrecFloat {
        PrecFloat::pi(self)
    }

    fn zero(self) -> PrecFloat {
        Precision::zero(self)
    }

    fn one(self) -> PrecFloat {
        Precision::one(self)
    }
}

impl Real for f64 {
    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    fn recip(&self) -> Self {
        f64::recip(*self)
    }

    fn sinh_cosh(&self) -> (Self, Self) {
        (self.sinh(), self.cosh())
    }

    fn erf(&self) -> Self {
        libm::erf(*self)
    }

    fn erfc(&self) -> Self {
        libm::erfc(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn mul_int(&self, n: i64) -> Self {
        self * n as f64
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

/// Native double precision, rounding to nearest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Native;

impl Backend for Native {
    type Real = f64;

    fn bits(self) -> usize {
        53
    }

    fn digits(self) -> usize {
        15
    }

    fn epsilon(self) -> f64 {
        2f64.powi(-53)
    }

    fn from_f64(self, value: f64) -> f64 {
        value
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_i64(self, value: i64) -> f64 {
        value as f64
    }

    fn pi(self) -> f64 {
        std::f64::consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of_squares<B: Backend>(backend: B, n: i64) -> B::Real {
        (1..=n).fold(backend.zero(), |acc, k| {
            let k = backend.from_i64(k);
            acc + k.clone() * k
        })
    }

    #[test]
    fn test_backends_agree_on_exact_work() {
        let precise = sum_of_squares(Precision::new(90).unwrap(), 100);
        let native = sum_of_squares(Native, 100);
        assert_eq!(precise.to_f64(), native);
        assert_eq!(native, 338_350.0);
    }

    #[test]
    fn test_native_erf() {
        assert!((Real::erf(&1.0_f64) - 0.842_700_792_949_714_9).abs() < 1e-15);
        assert!((Real::erfc(&10.0_f64) - 2.088_487_583_762_545e-45).abs() < 1e-58);
    }

    #[test]
    fn test_epsilon_matches() {
        let p = Precision::DOUBLE;
        assert_eq!(Backend::epsilon(p).to_f64(), Native.epsilon());
        assert_eq!(Backend::digits(p), Native.digits());
    }
}
