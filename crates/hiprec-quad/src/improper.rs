//! Other infinite intervals, reduced to `[x_min, ∞)`.

use hiprec_float::{Backend, PrecFloat, Precision, Real};

use crate::double_exponential::{DoubleExponential, QuadratureResult};
use crate::error::QuadratureError;

impl<B: Backend> DoubleExponential<B> {
    /// Estimates `∫ f(x) dx` over `(-∞, x_max]`.
    ///
    /// Uses the reflection `∫_{-∞}^{b} f(x) dx = ∫_{-b}^{∞} f(-x) dx`.
    ///
    /// # Errors
    ///
    /// As [`DoubleExponential::integrate`].
    pub fn integrate_from_neg_infinity<F>(
        &self,
        mut f: F,
        x_max: &B::Real,
    ) -> Result<QuadratureResult<B::Real>, QuadratureError>
    where
        F: FnMut(&B::Real) -> B::Real,
    {
        self.integrate(|x: &B::Real| f(&-x.clone()), &-x_max.clone())
    }

    /// Estimates `∫ f(x) dx` over the whole real line, split at zero.
    ///
    /// The diagnostics combine both halves: evaluations add up, the other
    /// fields report the worse half.
    ///
    /// # Errors
    ///
    /// As [`DoubleExponential::integrate`], for either half.
    pub fn integrate_full_line<F>(
        &self,
        mut f: F,
    ) -> Result<QuadratureResult<B::Real>, QuadratureError>
    where
        F: FnMut(&B::Real) -> B::Real,
    {
        let zero = self.backend().zero();
        let left = self.integrate_from_neg_infinity(&mut f, &zero)?;
        let right = self.integrate(&mut f, &zero)?;
        Ok(QuadratureResult {
            value: left.value + right.value,
            stability: worse(left.stability, right.stability),
            threshold: worse(left.threshold, right.threshold),
            refinements: left.refinements.max(right.refinements),
            evaluations: left.evaluations + right.evaluations,
            extreme: worse(left.extreme, right.extreme),
        })
    }
}

fn worse<T: Real>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Estimates `∫ f(x) dx` over `[x_min, ∞)` at the process-wide default
/// precision.
///
/// # Errors
///
/// As [`DoubleExponential::integrate`].
pub fn integrate_to_infinity<F>(f: F, x_min: f64) -> Result<PrecFloat, QuadratureError>
where
    F: FnMut(&PrecFloat) -> PrecFloat,
{
    let precision = Precision::current();
    DoubleExponential::new(precision)
        .integrate(f, &precision.from_f64(x_min))
        .map(|result| result.value)
}

/// Estimates `∫ f(x) dx` over `[0, ∞)` at the process-wide default
/// precision.
///
/// # Errors
///
/// As [`DoubleExponential::integrate`].
pub fn integrate_from_zero<F>(f: F) -> Result<PrecFloat, QuadratureError>
where
    F: FnMut(&PrecFloat) -> PrecFloat,
{
    integrate_to_infinity(f, 0.0)
}

/// Estimates `∫ f(x) dx` over `(-∞, x_max]` at the process-wide default
/// precision.
///
/// # Errors
///
/// As [`DoubleExponential::integrate`].
pub fn integrate_from_neg_infinity<F>(f: F, x_max: f64) -> Result<PrecFloat, QuadratureError>
where
    F: FnMut(&PrecFloat) -> PrecFloat,
{
    let precision = Precision::current();
    DoubleExponential::new(precision)
        .integrate_from_neg_infinity(f, &precision.from_f64(x_max))
        .map(|result| result.value)
}

/// Estimates `∫ f(x) dx` over the real line at the process-wide default
/// precision.
///
/// # Errors
///
/// As [`DoubleExponential::integrate`].
pub fn integrate_full_line<F>(f: F) -> Result<PrecFloat, QuadratureError>
where
    F: FnMut(&PrecFloat) -> PrecFloat,
{
    DoubleExponential::new(Precision::current())
        .integrate_full_line(f)
        .map(|result| result.value)
}
