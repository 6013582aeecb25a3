//! The arbitrary precision float.
//!
//! This module provides a wrapper around `dashu::float::FBig` that rounds
//! toward negative infinity, carries its own precision, and represents
//! infinities and undefined results as sentinel values instead of
//! panicking.

use std::cmp::Ordering;
use std::fmt;

use dashu::base::BitTest;
use dashu::float::round::mode::Down;
use dashu::float::FBig;
use dashu::integer::IBig;

use crate::precision::Precision;

/// The rounding mode used by every operation: toward negative infinity.
pub type RoundDown = Down;

/// Binary float rounding toward negative infinity.
pub(crate) type Big = FBig<RoundDown>;

/// Binary exponents are confined to `±EXPONENT_LIMIT`.
pub const EXPONENT_LIMIT: isize = 1 << 30;

#[derive(Clone)]
pub(crate) enum Kind {
    Finite(Big),
    PosInfinity,
    NegInfinity,
    Nan,
}

/// An arbitrary precision real number.
///
/// Every value records the [`Precision`] it was allocated at. All
/// arithmetic rounds toward negative infinity. Results that leave the
/// exponent range become signed infinities (overflow) or zero
/// (underflow); undefined results such as `0/0` or `asin(2)` are NaN.
///
/// # Example
///
/// ```
/// use hiprec_float::{PrecFloat, Precision};
///
/// let p = Precision::new(256).unwrap();
/// let third = p.one() / p.from_i64(3);
/// assert!(third.clone() * 3 < p.one());
/// assert_eq!(third.precision(), p);
/// ```
#[derive(Clone)]
pub struct PrecFloat {
    pub(crate) kind: Kind,
    pub(crate) precision: Precision,
}

impl PrecFloat {
    /// Creates zero at the process-wide default precision.
    #[must_use]
    pub fn new() -> Self {
        Self::zero_at(Precision::current())
    }

    /// Creates zero at the given precision.
    #[must_use]
    pub fn zero_at(precision: Precision) -> Self {
        Self {
            kind: Kind::Finite(Big::ZERO),
            precision,
        }
    }

    /// Positive infinity.
    #[must_use]
    pub fn infinity(precision: Precision) -> Self {
        Self {
            kind: Kind::PosInfinity,
            precision,
        }
    }

    /// Negative infinity.
    #[must_use]
    pub fn neg_infinity(precision: Precision) -> Self {
        Self {
            kind: Kind::NegInfinity,
            precision,
        }
    }

    /// The undefined value.
    #[must_use]
    pub fn nan(precision: Precision) -> Self {
        Self {
            kind: Kind::Nan,
            precision,
        }
    }

    /// Converts a double, rounding toward negative infinity.
    #[must_use]
    pub fn from_f64_at(value: f64, precision: Precision) -> Self {
        match exact_f64(value) {
            Some(big) => Self::from_big(big, precision),
            None if value.is_nan() => Self::nan(precision),
            None if value > 0.0 => Self::infinity(precision),
            None => Self::neg_infinity(precision),
        }
    }

    /// Converts a signed integer, rounding toward negative infinity.
    #[must_use]
    pub fn from_i64_at(value: i64, precision: Precision) -> Self {
        Self::from_big(Big::from_parts(IBig::from(value), 0), precision)
    }

    /// Converts an unsigned integer, rounding toward negative infinity.
    #[must_use]
    pub fn from_u64_at(value: u64, precision: Precision) -> Self {
        Self::from_big(Big::from_parts(IBig::from(value), 0), precision)
    }

    /// Converts an arbitrary precision integer, rounding toward negative
    /// infinity.
    #[must_use]
    pub fn from_ibig_at(value: IBig, precision: Precision) -> Self {
        Self::from_big(Big::from_parts(value, 0), precision)
    }

    /// Rounds an exact binary value into `precision`, saturating the
    /// exponent range.
    pub(crate) fn from_big(big: Big, precision: Precision) -> Self {
        let rounded = big.with_precision(precision.bits()).value();
        Self {
            kind: saturate(rounded),
            precision,
        }
    }

    /// Builds a value that holds `value` exactly, whatever the precision
    /// label says. Used for native operands of mixed arithmetic.
    pub(crate) fn exact_native(value: f64) -> Self {
        match exact_f64(value) {
            Some(big) => Self {
                kind: Kind::Finite(big),
                precision: Precision::DOUBLE,
            },
            None => Self::from_f64_at(value, Precision::DOUBLE),
        }
    }

    pub(crate) fn exact_int(value: i64) -> Self {
        Self {
            kind: Kind::Finite(Big::from_parts(IBig::from(value), 0)),
            precision: Precision::DOUBLE,
        }
    }

    /// Returns the precision this value was allocated at.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns a copy rounded into `precision`.
    #[must_use]
    pub fn round_to(&self, precision: Precision) -> Self {
        match &self.kind {
            Kind::Finite(big) => Self::from_big(big.clone(), precision),
            kind => Self {
                kind: kind.clone(),
                precision,
            },
        }
    }

    /// Returns a copy rounded into the current process-wide precision.
    ///
    /// This is the copy behaviour of a value whose storage is always
    /// allocated at the default precision: the result can be less precise
    /// than `self` if the default was lowered in the meantime.
    #[must_use]
    pub fn round_to_default(&self) -> Self {
        self.round_to(Precision::current())
    }

    /// Assigns `other` into `self`, keeping the precision of `self`.
    pub fn assign(&mut self, other: &Self) {
        *self = other.round_to(self.precision);
    }

    /// Returns true unless the value is an infinity or NaN.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Finite(_))
    }

    /// Returns true for either infinity.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self.kind, Kind::PosInfinity | Kind::NegInfinity)
    }

    /// Returns true for the undefined value.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::Nan)
    }

    /// Returns true for exact zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, Kind::Finite(big) if big.repr().is_zero())
    }

    /// Returns true for values strictly below zero, including `-∞`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match &self.kind {
            Kind::Finite(big) => is_negative(big),
            Kind::NegInfinity => true,
            Kind::PosInfinity | Kind::Nan => false,
        }
    }

    /// Returns true for values strictly above zero, including `+∞`.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match &self.kind {
            Kind::Finite(big) => !is_negative(big) && !big.repr().is_zero(),
            Kind::PosInfinity => true,
            Kind::NegInfinity | Kind::Nan => false,
        }
    }

    /// Returns -1, 0 or 1; NaN has sign 0.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.is_negative() {
            -1
        } else if self.is_positive() {
            1
        } else {
            0
        }
    }

    /// Converts to a double, rounding toward negative infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match &self.kind {
            Kind::Finite(big) => big_to_f64(big),
            Kind::PosInfinity => f64::INFINITY,
            Kind::NegInfinity => f64::NEG_INFINITY,
            Kind::Nan => f64::NAN,
        }
    }

    /// Converts to an `i64`, truncating toward zero.
    ///
    /// Returns `None` for non-finite values and values out of range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.trunc_to_ibig().and_then(|int| i64::try_from(int).ok())
    }

    /// Returns the integer part, truncated toward zero.
    #[must_use]
    pub fn trunc_to_ibig(&self) -> Option<IBig> {
        match &self.kind {
            Kind::Finite(big) => Some(trunc(big)),
            _ => None,
        }
    }

    /// Returns the largest integer not greater than `self`.
    #[must_use]
    pub fn floor_to_ibig(&self) -> Option<IBig> {
        match &self.kind {
            Kind::Finite(big) => Some(floor(big)),
            _ => None,
        }
    }

    /// Returns true if the value is a finite integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        match &self.kind {
            Kind::Finite(big) => integer_value(big).is_some(),
            _ => false,
        }
    }

    /// Orders all values, placing NaN above `+∞`.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| self.is_nan().cmp(&other.is_nan()))
    }

    pub(crate) fn finite(&self) -> Option<&Big> {
        match &self.kind {
            Kind::Finite(big) => Some(big),
            _ => None,
        }
    }

    fn rank(&self) -> i8 {
        match self.kind {
            Kind::NegInfinity => -1,
            Kind::Finite(_) => 0,
            Kind::PosInfinity => 1,
            Kind::Nan => 2,
        }
    }
}

impl Default for PrecFloat {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrecFloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for PrecFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.kind, &other.kind) {
            (Kind::Nan, _) | (_, Kind::Nan) => None,
            (Kind::Finite(a), Kind::Finite(b)) => Some(a.cmp(b)),
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

impl PartialEq<f64> for PrecFloat {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::exact_native(*other)
    }
}

impl PartialOrd<f64> for PrecFloat {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Self::exact_native(*other))
    }
}

impl PartialEq<i64> for PrecFloat {
    fn eq(&self, other: &i64) -> bool {
        *self == Self::exact_int(*other)
    }
}

impl PartialOrd<i64> for PrecFloat {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&Self::exact_int(*other))
    }
}

impl fmt::Debug for PrecFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrecFloat({}, {} bits)", self, self.precision.bits())
    }
}

impl From<f64> for PrecFloat {
    fn from(value: f64) -> Self {
        Self::from_f64_at(value, Precision::current())
    }
}

impl From<f32> for PrecFloat {
    fn from(value: f32) -> Self {
        Self::from_f64_at(f64::from(value), Precision::current())
    }
}

impl From<i64> for PrecFloat {
    fn from(value: i64) -> Self {
        Self::from_i64_at(value, Precision::current())
    }
}

impl From<i32> for PrecFloat {
    fn from(value: i32) -> Self {
        Self::from_i64_at(i64::from(value), Precision::current())
    }
}

impl From<u64> for PrecFloat {
    fn from(value: u64) -> Self {
        Self::from_u64_at(value, Precision::current())
    }
}

impl From<u32> for PrecFloat {
    fn from(value: u32) -> Self {
        Self::from_u64_at(u64::from(value), Precision::current())
    }
}

impl From<IBig> for PrecFloat {
    fn from(value: IBig) -> Self {
        Self::from_ibig_at(value, Precision::current())
    }
}

impl From<&PrecFloat> for f64 {
    fn from(value: &PrecFloat) -> Self {
        value.to_f64()
    }
}

/// Decomposes a finite double into an exact binary float.
fn exact_f64(value: f64) -> Option<Big> {
    if !value.is_finite() {
        return None;
    }
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as isize;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    let significand = if negative {
        -IBig::from(mantissa)
    } else {
        IBig::from(mantissa)
    };
    Some(Big::from_parts(significand, exponent))
}

/// Rounds toward negative infinity into the double format, including the
/// subnormal range.
fn big_to_f64(big: &Big) -> f64 {
    if big.repr().is_zero() {
        return 0.0;
    }
    let negative = is_negative(big);
    let magnitude = log2_bound(big);
    if magnitude < -1073 {
        return if negative { -f64::from_bits(1) } else { 0.0 };
    }
    let bits = if magnitude <= -1022 {
        (magnitude + 1074).unsigned_abs()
    } else {
        53
    };
    let rounded = big.clone().with_precision(bits).value();
    if log2_bound(&rounded) > 1024 {
        return if negative { f64::NEG_INFINITY } else { f64::MAX };
    }
    let repr = rounded.repr();
    let Ok(significand) = i64::try_from(repr.significand().clone()) else {
        return f64::NAN;
    };
    let exponent = i32::try_from(repr.exponent()).unwrap_or(0);
    // Split the scaling so neither factor leaves the double range.
    let half = exponent / 2;
    significand as f64 * 2f64.powi(half) * 2f64.powi(exponent - half)
}

pub(crate) fn saturate(big: Big) -> Kind {
    if big.repr().is_zero() {
        return Kind::Finite(big);
    }
    let magnitude = log2_bound(&big);
    if magnitude > EXPONENT_LIMIT {
        if is_negative(&big) {
            Kind::NegInfinity
        } else {
            Kind::PosInfinity
        }
    } else if magnitude < -EXPONENT_LIMIT {
        Kind::Finite(Big::ZERO)
    } else {
        Kind::Finite(big)
    }
}

/// Returns `m` such that `2^(m-1) <= |big| < 2^m`; `isize::MIN` for zero.
pub(crate) fn log2_bound(big: &Big) -> isize {
    let repr = big.repr();
    if repr.is_zero() {
        return isize::MIN;
    }
    let bits = isize::try_from(repr.significand().bit_len()).unwrap_or(isize::MAX);
    bits.saturating_add(repr.exponent())
}

pub(crate) fn is_negative(big: &Big) -> bool {
    *big.repr().significand() < IBig::ZERO
}

fn trunc(big: &Big) -> IBig {
    let repr = big.repr();
    let significand = repr.significand().clone();
    let exponent = repr.exponent();
    if exponent >= 0 {
        significand << exponent.unsigned_abs()
    } else {
        significand / (IBig::ONE << exponent.unsigned_abs())
    }
}

pub(crate) fn floor(big: &Big) -> IBig {
    let truncated = trunc(big);
    if is_negative(big) && integer_value(big).is_none() {
        truncated - IBig::ONE
    } else {
        truncated
    }
}

/// Returns the integer value of `big` if it has no fractional part.
pub(crate) fn integer_value(big: &Big) -> Option<IBig> {
    let repr = big.repr();
    let exponent = repr.exponent();
    if exponent >= 0 || repr.is_zero() {
        return Some(trunc(big));
    }
    let divisor = IBig::ONE << exponent.unsigned_abs();
    let significand = repr.significand();
    let quotient = significand / &divisor;
    if &(&quotient * &divisor) == significand {
        Some(quotient)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(bits: usize) -> Precision {
        Precision::new(bits).unwrap()
    }

    #[test]
    fn test_f64_round_trip() {
        for value in [0.0, 1.0, -1.0, 0.1, -2.5e-300, 1.0e300, 123_456.789] {
            let x = PrecFloat::from_f64_at(value, p(53));
            assert_eq!(x.to_f64(), value);
            let y = PrecFloat::from_f64_at(value, p(200));
            assert_eq!(y.to_f64(), value);
        }
    }

    #[test]
    fn test_conversion_rounds_down() {
        // 0.1 is not representable in 8 bits; rounding down stays below it.
        let x = PrecFloat::from_f64_at(0.1, p(8));
        assert!(x < 0.1);
        let y = PrecFloat::from_f64_at(-0.1, p(8));
        assert!(y < -0.1);
    }

    #[test]
    fn test_integer_conversion() {
        let x = PrecFloat::from_i64_at(-12345, p(64));
        assert_eq!(x.to_i64(), Some(-12345));
        // 255 needs 8 bits; at 4 bits it rounds down to 240.
        let y = PrecFloat::from_u64_at(255, p(4));
        assert_eq!(y.to_i64(), Some(240));
    }

    #[test]
    fn test_non_finite_conversion() {
        assert!(PrecFloat::from_f64_at(f64::NAN, p(64)).is_nan());
        assert!(PrecFloat::from_f64_at(f64::INFINITY, p(64)).is_infinite());
        assert!(PrecFloat::from_f64_at(f64::NEG_INFINITY, p(64)).is_negative());
    }

    #[test]
    fn test_comparisons_ignore_precision() {
        let a = PrecFloat::from_f64_at(0.5, p(10));
        let b = PrecFloat::from_f64_at(0.5, p(1000));
        assert_eq!(a, b);
        assert!(a <= b && a >= b);
        assert!(PrecFloat::neg_infinity(p(10)) < a);
        assert!(PrecFloat::infinity(p(10)) > b);
    }

    #[test]
    fn test_nan_is_unordered() {
        let nan = PrecFloat::nan(p(64));
        let one = PrecFloat::from_i64_at(1, p(64));
        assert_ne!(nan, nan.clone());
        assert!(nan.partial_cmp(&one).is_none());
        assert_eq!(nan.total_cmp(&one), Ordering::Greater);
    }

    #[test]
    fn test_clone_keeps_precision() {
        let x = PrecFloat::from_f64_at(1.5, p(300));
        let y = x.clone();
        assert_eq!(y.precision(), p(300));
        let z = x.round_to(p(20));
        assert_eq!(z.precision(), p(20));
        assert_eq!(z, x);
    }

    #[test]
    fn test_assign_keeps_target_precision() {
        let mut x = PrecFloat::zero_at(p(4));
        x.assign(&PrecFloat::from_u64_at(255, p(64)));
        assert_eq!(x.precision(), p(4));
        assert_eq!(x.to_i64(), Some(240));
    }

    #[test]
    fn test_floor_and_trunc() {
        let x = PrecFloat::from_f64_at(-2.5, p(64));
        assert_eq!(x.trunc_to_ibig(), Some(IBig::from(-2)));
        assert_eq!(x.floor_to_ibig(), Some(IBig::from(-3)));
        assert!(!x.is_integer());
        assert!(PrecFloat::from_f64_at(-4.0, p(64)).is_integer());
    }
}
