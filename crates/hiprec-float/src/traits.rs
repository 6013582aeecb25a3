//! `num-traits` integration.
//!
//! The identities and conversions produced here are allocated at the
//! process-wide default precision.

use std::ops::{Rem, RemAssign};

use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

use crate::error::FloatError;
use crate::float::{Big, Kind, PrecFloat};
use crate::precision::Precision;

impl Zero for PrecFloat {
    fn zero() -> Self {
        Precision::current().zero()
    }

    fn is_zero(&self) -> bool {
        PrecFloat::is_zero(self)
    }
}

impl One for PrecFloat {
    fn one() -> Self {
        Precision::current().one()
    }
}

impl PrecFloat {
    /// Remainder of truncated division, `self - trunc(self / rhs) * rhs`,
    /// computed exactly before the final rounding.
    #[must_use]
    pub fn rem_at(&self, rhs: &Self, precision: Precision) -> Self {
        match (&self.kind, &rhs.kind) {
            (Kind::Finite(_), Kind::Finite(b)) if b.repr().is_zero() => Self::nan(precision),
            (Kind::Finite(a), Kind::Finite(b)) => Self::from_big(exact_rem(a, b), precision),
            (Kind::Finite(_), Kind::PosInfinity | Kind::NegInfinity) => self.round_to(precision),
            _ => Self::nan(precision),
        }
    }
}

fn exact_rem(a: &Big, b: &Big) -> Big {
    let (a, b) = (a.repr(), b.repr());
    let exponent = a.exponent().min(b.exponent());
    let align = |significand: &dashu::integer::IBig, e: isize| {
        significand.clone() << (e - exponent).unsigned_abs()
    };
    let remainder = align(a.significand(), a.exponent()) % align(b.significand(), b.exponent());
    Big::from_parts(remainder, exponent)
}

impl Rem<&PrecFloat> for &PrecFloat {
    type Output = PrecFloat;

    fn rem(self, rhs: &PrecFloat) -> PrecFloat {
        self.rem_at(rhs, self.precision.max(rhs.precision))
    }
}

impl Rem for PrecFloat {
    type Output = PrecFloat;

    fn rem(self, rhs: PrecFloat) -> PrecFloat {
        (&self).rem(&rhs)
    }
}

impl RemAssign<&PrecFloat> for PrecFloat {
    fn rem_assign(&mut self, rhs: &PrecFloat) {
        *self = self.rem_at(rhs, self.precision);
    }
}

impl Num for PrecFloat {
    type FromStrRadixErr = FloatError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix != 10 {
            return Err(FloatError::Parse(format!("{s} (radix {radix})")));
        }
        s.parse()
    }
}

impl Signed for PrecFloat {
    fn abs(&self) -> Self {
        PrecFloat::abs(self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            self.precision.max(other.precision).zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> Self {
        if self.is_nan() {
            return self.clone();
        }
        PrecFloat::from_i64_at(i64::from(PrecFloat::signum(self)), self.precision)
    }

    fn is_positive(&self) -> bool {
        PrecFloat::is_positive(self)
    }

    fn is_negative(&self) -> bool {
        PrecFloat::is_negative(self)
    }
}

impl FromPrimitive for PrecFloat {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Some(Self::from(n))
    }
}

impl ToPrimitive for PrecFloat {
    fn to_i64(&self) -> Option<i64> {
        PrecFloat::to_i64(self)
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc_to_ibig().and_then(|int| u64::try_from(int).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(PrecFloat::to_f64(self))
    }
}
