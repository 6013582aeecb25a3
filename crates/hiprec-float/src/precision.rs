//! Working precision.
//!
//! A [`Precision`] is an explicit, validated bit count. Every [`PrecFloat`]
//! records the precision it was allocated at, so changing the process-wide
//! default never alters a value that already exists.
//!
//! The process-wide default is read exactly once per value, at
//! construction time, by the convenience constructors (`From<f64>`,
//! `PrecFloat::new`, `"1.5".parse()`, ...).

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashu::float::Context;
use dashu::integer::IBig;

use crate::error::FloatError;
use crate::float::{Big, PrecFloat, RoundDown};

/// Default precision of a process that never configured one.
pub const INITIAL_PRECISION_BITS: usize = 53;

static DEFAULT_PRECISION: AtomicUsize = AtomicUsize::new(INITIAL_PRECISION_BITS);

/// A non-zero number of significand bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Precision(NonZeroUsize);

impl Precision {
    /// Precision of an IEEE-754 double.
    pub const DOUBLE: Self = Self(match NonZeroUsize::new(53) {
        Some(bits) => bits,
        None => unreachable!(),
    });

    /// Creates a precision of `bits` significand bits.
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::InvalidPrecision`] if `bits` is zero.
    pub fn new(bits: usize) -> Result<Self, FloatError> {
        NonZeroUsize::new(bits)
            .map(Self)
            .ok_or(FloatError::InvalidPrecision { bits })
    }

    /// Returns the process-wide default precision.
    #[must_use]
    pub fn current() -> Self {
        let bits = DEFAULT_PRECISION.load(Ordering::Relaxed);
        // The stored value is only ever written through `set_default`,
        // which rejects zero.
        Self(NonZeroUsize::new(bits).unwrap_or(Self::DOUBLE.0))
    }

    /// Makes this precision the process-wide default.
    pub fn set_default(self) {
        DEFAULT_PRECISION.store(self.bits(), Ordering::Relaxed);
    }

    /// Returns the number of significand bits.
    #[must_use]
    pub const fn bits(self) -> usize {
        self.0.get()
    }

    /// Returns the number of decimal digits that can be printed
    /// meaningfully: `floor(bits * log10(2))`.
    #[must_use]
    pub fn digits(self) -> usize {
        digits_for_bits(self.bits())
    }

    /// Returns `2^-bits`.
    #[must_use]
    pub fn epsilon(self) -> PrecFloat {
        let exponent = -isize::try_from(self.bits()).unwrap_or(isize::MAX);
        PrecFloat::from_big(Big::from_parts(IBig::ONE, exponent), self)
    }

    /// Returns a precision with `extra` additional bits.
    #[must_use]
    pub fn with_guard(self, extra: usize) -> Self {
        Self(self.0.saturating_add(extra))
    }

    /// Returns the larger of two precisions.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    pub(crate) fn context(self) -> Context<RoundDown> {
        Context::new(self.bits())
    }

    /// Zero at this precision.
    #[must_use]
    pub fn zero(self) -> PrecFloat {
        PrecFloat::zero_at(self)
    }

    /// One at this precision.
    #[must_use]
    pub fn one(self) -> PrecFloat {
        PrecFloat::from_i64_at(1, self)
    }

    /// Converts a double at this precision.
    #[must_use]
    pub fn from_f64(self, value: f64) -> PrecFloat {
        PrecFloat::from_f64_at(value, self)
    }

    /// Converts a signed integer at this precision.
    #[must_use]
    pub fn from_i64(self, value: i64) -> PrecFloat {
        PrecFloat::from_i64_at(value, self)
    }

    /// Converts an unsigned integer at this precision.
    #[must_use]
    pub fn from_u64(self, value: u64) -> PrecFloat {
        PrecFloat::from_u64_at(value, self)
    }

    /// π at this precision.
    #[must_use]
    pub fn pi(self) -> PrecFloat {
        PrecFloat::pi(self)
    }

    /// `lhs + rhs` rounded into this precision.
    #[must_use]
    pub fn add(self, lhs: &PrecFloat, rhs: &PrecFloat) -> PrecFloat {
        lhs.add_at(rhs, self)
    }

    /// `lhs - rhs` rounded into this precision.
    #[must_use]
    pub fn sub(self, lhs: &PrecFloat, rhs: &PrecFloat) -> PrecFloat {
        lhs.sub_at(rhs, self)
    }

    /// `lhs * rhs` rounded into this precision.
    #[must_use]
    pub fn mul(self, lhs: &PrecFloat, rhs: &PrecFloat) -> PrecFloat {
        lhs.mul_at(rhs, self)
    }

    /// `lhs / rhs` rounded into this precision.
    #[must_use]
    pub fn div(self, lhs: &PrecFloat, rhs: &PrecFloat) -> PrecFloat {
        lhs.div_at(rhs, self)
    }

    /// `-value` rounded into this precision.
    #[must_use]
    pub fn neg(self, value: &PrecFloat) -> PrecFloat {
        value.neg_at(self)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Debug for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Precision({} bits)", self.bits())
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

impl TryFrom<usize> for Precision {
    type Error = FloatError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

fn digits_for_bits(bits: usize) -> usize {
    // Truncation matches integer conversion of `bits * log10(2)`.
    (bits as f64 * std::f64::consts::LOG10_2) as usize
}

/// Sets the process-wide precision used by values constructed afterwards.
///
/// # Errors
///
/// Returns [`FloatError::InvalidPrecision`] if `bits` is zero; the default
/// is left unchanged in that case.
pub fn set_default_precision(bits: usize) -> Result<Precision, FloatError> {
    let precision = Precision::new(bits)?;
    precision.set_default();
    Ok(precision)
}

/// Returns the current process-wide precision in bits.
#[must_use]
pub fn default_precision() -> usize {
    Precision::current().bits()
}

/// Returns `2^-default_precision()`.
#[must_use]
pub fn epsilon() -> PrecFloat {
    Precision::current().epsilon()
}

/// Returns the number of decimal digits of the default precision.
#[must_use]
pub fn digit_count() -> usize {
    Precision::current().digits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bits_rejected() {
        assert_eq!(
            Precision::new(0),
            Err(FloatError::InvalidPrecision { bits: 0 })
        );
    }

    #[test]
    fn test_digits() {
        assert_eq!(Precision::new(53).unwrap().digits(), 15);
        assert_eq!(Precision::new(1024).unwrap().digits(), 308);
        assert_eq!(Precision::new(1).unwrap().digits(), 0);
    }

    #[test]
    fn test_digits_increase_with_precision() {
        let mut last = 0;
        for bits in [4, 16, 64, 256, 1024, 4096] {
            let digits = Precision::new(bits).unwrap().digits();
            assert!(digits > last || bits == 4);
            last = digits;
        }
    }

    #[test]
    fn test_epsilon_is_power_of_two() {
        let p = Precision::new(100).unwrap();
        let eps = p.epsilon();
        let two = p.from_i64(2);
        assert_eq!(eps.clone() * two.pow(&p.from_i64(100)), p.one());
        assert!(eps > p.zero());
    }

    #[test]
    fn test_with_guard() {
        let p = Precision::new(64).unwrap();
        assert_eq!(p.with_guard(32).bits(), 96);
        assert_eq!(p.max(Precision::DOUBLE), p);
    }
}
