//! The scalar contract of the dense containers.

use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use hiprec_float::{PrecFloat, Precision};
use num_traits::Signed;

/// A real scalar the dense containers can compute with.
///
/// The associated constructors work at the process-wide default precision.
/// Operator results take the larger operand precision, so identities built
/// at the default mix freely with entries of any precision.
pub trait Scalar:
    Clone
    + Default
    + Debug
    + Display
    + PartialOrd
    + Signed
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
{
    /// Relative cost of reading a value.
    const READ_COST: usize;
    /// Relative cost of an addition.
    const ADD_COST: usize;
    /// Relative cost of a multiplication.
    const MUL_COST: usize;

    /// Converts an integer.
    fn from_i64(value: i64) -> Self;

    /// Converts a double at the precision of `like`.
    fn from_f64_like(value: f64, like: &Self) -> Self;

    /// Unit roundoff.
    fn epsilon() -> Self;

    /// Tolerance for approximate comparisons.
    fn dummy_precision() -> Self;

    /// Meaningful decimal digits.
    fn digits10() -> usize;
}

impl Scalar for PrecFloat {
    const READ_COST: usize = 6;
    const ADD_COST: usize = 150;
    const MUL_COST: usize = 100;

    fn from_i64(value: i64) -> Self {
        PrecFloat::from_i64_at(value, Precision::current())
    }

    fn from_f64_like(value: f64, like: &Self) -> Self {
        PrecFloat::from_f64_at(value, like.precision())
    }

    fn epsilon() -> Self {
        hiprec_float::epsilon()
    }

    fn dummy_precision() -> Self {
        hiprec_float::epsilon() * 4096
    }

    fn digits10() -> usize {
        hiprec_float::digit_count()
    }
}

impl Scalar for f64 {
    const READ_COST: usize = 1;
    const ADD_COST: usize = 1;
    const MUL_COST: usize = 1;

    #[allow(clippy::cast_precision_loss)]
    fn from_i64(value: i64) -> Self {
        value as f64
    }

    fn from_f64_like(value: f64, _like: &Self) -> Self {
        value
    }

    fn epsilon() -> Self {
        f64::EPSILON / 2.0
    }

    fn dummy_precision() -> Self {
        1e-12
    }

    fn digits10() -> usize {
        15
    }
}
