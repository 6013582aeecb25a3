//! Arithmetic.
//!
//! The `*_at` methods round into an explicit precision. The operator
//! impls allocate their result at the larger of the operand precisions;
//! a native `f64` or `i64` operand is taken exactly and imposes no
//! precision of its own. Compound assignment keeps the precision of the
//! assigned value.
//!
//! To allocate every result at the process-wide default instead, use the
//! named operations on `Precision::current()`:
//! [`Precision::add`](crate::Precision::add) and its siblings.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::float::{Kind, PrecFloat};
use crate::precision::Precision;

impl PrecFloat {
    /// `self + rhs` rounded into `precision`.
    #[must_use]
    pub fn add_at(&self, rhs: &Self, precision: Precision) -> Self {
        match (&self.kind, &rhs.kind) {
            (Kind::Finite(a), Kind::Finite(b)) => {
                let big = precision.context().add(a.repr(), b.repr()).value();
                Self::from_big(big, precision)
            }
            (Kind::Nan, _)
            | (_, Kind::Nan)
            | (Kind::PosInfinity, Kind::NegInfinity)
            | (Kind::NegInfinity, Kind::PosInfinity) => Self::nan(precision),
            (Kind::PosInfinity, _) | (_, Kind::PosInfinity) => Self::infinity(precision),
            (Kind::NegInfinity, _) | (_, Kind::NegInfinity) => Self::neg_infinity(precision),
        }
    }

    /// `self - rhs` rounded into `precision`.
    #[must_use]
    pub fn sub_at(&self, rhs: &Self, precision: Precision) -> Self {
        match (&self.kind, &rhs.kind) {
            (Kind::Finite(a), Kind::Finite(b)) => {
                let big = precision.context().sub(a.repr(), b.repr()).value();
                Self::from_big(big, precision)
            }
            _ => self.add_at(&rhs.neg_at(precision), precision),
        }
    }

    /// `self * rhs` rounded into `precision`.
    #[must_use]
    pub fn mul_at(&self, rhs: &Self, precision: Precision) -> Self {
        match (&self.kind, &rhs.kind) {
            (Kind::Finite(a), Kind::Finite(b)) => {
                let big = precision.context().mul(a.repr(), b.repr()).value();
                Self::from_big(big, precision)
            }
            (Kind::Nan, _) | (_, Kind::Nan) => Self::nan(precision),
            _ if self.is_zero() || rhs.is_zero() => Self::nan(precision),
            _ => Self::signed_infinity(self.is_negative() != rhs.is_negative(), precision),
        }
    }

    /// `self / rhs` rounded into `precision`.
    ///
    /// Division of a non-zero value by zero gives an infinity carrying
    /// the sign of the dividend; `0/0` and `∞/∞` are NaN.
    #[must_use]
    pub fn div_at(&self, rhs: &Self, precision: Precision) -> Self {
        match (&self.kind, &rhs.kind) {
            (Kind::Nan, _) | (_, Kind::Nan) => Self::nan(precision),
            (Kind::Finite(_), Kind::Finite(_)) if rhs.is_zero() => {
                if self.is_zero() {
                    Self::nan(precision)
                } else {
                    Self::signed_infinity(self.is_negative(), precision)
                }
            }
            (Kind::Finite(a), Kind::Finite(b)) => {
                let big = precision.context().div(a.repr(), b.repr()).value();
                Self::from_big(big, precision)
            }
            (Kind::Finite(_), _) => Self::zero_at(precision),
            (_, Kind::Finite(_)) => {
                Self::signed_infinity(self.is_negative() != rhs.is_negative(), precision)
            }
            _ => Self::nan(precision),
        }
    }

    /// `-self` rounded into `precision`.
    #[must_use]
    pub fn neg_at(&self, precision: Precision) -> Self {
        match &self.kind {
            Kind::Finite(big) => Self::from_big(-big.clone(), precision),
            Kind::PosInfinity => Self::neg_infinity(precision),
            Kind::NegInfinity => Self::infinity(precision),
            Kind::Nan => Self::nan(precision),
        }
    }

    pub(crate) fn signed_infinity(negative: bool, precision: Precision) -> Self {
        if negative {
            Self::neg_infinity(precision)
        } else {
            Self::infinity(precision)
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $at:ident, $assign_trait:ident, $assign:ident) => {
        impl $trait<&PrecFloat> for &PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: &PrecFloat) -> PrecFloat {
                self.$at(rhs, self.precision.max(rhs.precision))
            }
        }

        impl $trait<PrecFloat> for &PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: PrecFloat) -> PrecFloat {
                self.$method(&rhs)
            }
        }

        impl $trait<&PrecFloat> for PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: &PrecFloat) -> PrecFloat {
                (&self).$method(rhs)
            }
        }

        impl $trait for PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: PrecFloat) -> PrecFloat {
                (&self).$method(&rhs)
            }
        }

        impl $trait<f64> for &PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: f64) -> PrecFloat {
                self.$at(&PrecFloat::exact_native(rhs), self.precision)
            }
        }

        impl $trait<f64> for PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: f64) -> PrecFloat {
                (&self).$method(rhs)
            }
        }

        impl $trait<&PrecFloat> for f64 {
            type Output = PrecFloat;

            fn $method(self, rhs: &PrecFloat) -> PrecFloat {
                PrecFloat::exact_native(self).$at(rhs, rhs.precision)
            }
        }

        impl $trait<PrecFloat> for f64 {
            type Output = PrecFloat;

            fn $method(self, rhs: PrecFloat) -> PrecFloat {
                self.$method(&rhs)
            }
        }

        impl $trait<i64> for &PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: i64) -> PrecFloat {
                self.$at(&PrecFloat::exact_int(rhs), self.precision)
            }
        }

        impl $trait<i64> for PrecFloat {
            type Output = PrecFloat;

            fn $method(self, rhs: i64) -> PrecFloat {
                (&self).$method(rhs)
            }
        }

        impl $trait<&PrecFloat> for i64 {
            type Output = PrecFloat;

            fn $method(self, rhs: &PrecFloat) -> PrecFloat {
                PrecFloat::exact_int(self).$at(rhs, rhs.precision)
            }
        }

        impl $trait<PrecFloat> for i64 {
            type Output = PrecFloat;

            fn $method(self, rhs: PrecFloat) -> PrecFloat {
                self.$method(&rhs)
            }
        }

        impl $assign_trait<&PrecFloat> for PrecFloat {
            fn $assign(&mut self, rhs: &PrecFloat) {
                *self = self.$at(rhs, self.precision);
            }
        }

        impl $assign_trait for PrecFloat {
            fn $assign(&mut self, rhs: PrecFloat) {
                *self = self.$at(&rhs, self.precision);
            }
        }

        impl $assign_trait<f64> for PrecFloat {
            fn $assign(&mut self, rhs: f64) {
                *self = self.$at(&PrecFloat::exact_native(rhs), self.precision);
            }
        }

        impl $assign_trait<i64> for PrecFloat {
            fn $assign(&mut self, rhs: i64) {
                *self = self.$at(&PrecFloat::exact_int(rhs), self.precision);
            }
        }
    };
}

impl_binary_op!(Add, add, add_at, AddAssign, add_assign);
impl_binary_op!(Sub, sub, sub_at, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, mul_at, MulAssign, mul_assign);
impl_binary_op!(Div, div, div_at, DivAssign, div_assign);

impl Neg for PrecFloat {
    type Output = PrecFloat;

    fn neg(self) -> PrecFloat {
        self.neg_at(self.precision)
    }
}

impl Neg for &PrecFloat {
    type Output = PrecFloat;

    fn neg(self) -> PrecFloat {
        self.neg_at(self.precision)
    }
}

impl std::iter::Sum for PrecFloat {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<PrecFloat>, x| match acc {
            Some(acc) => Some(acc + x),
            None => Some(x),
        })
        .unwrap_or_default()
    }
}

impl std::iter::Product for PrecFloat {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<PrecFloat>, x| match acc {
            Some(acc) => Some(acc * x),
            None => Some(x),
        })
        .unwrap_or_else(|| Precision::current().one())
    }
}
