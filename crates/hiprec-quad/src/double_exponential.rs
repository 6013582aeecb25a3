//! Double-exponential quadrature over `[x_min, ∞)`.
//!
//! The substitution
//!
//! ```text
//! x(t) = x_min + exp((π/2)·sinh(t))
//! c(t) = f(x(t)) · (π/2)·exp((π/2)·sinh(t))·cosh(t)
//! ```
//!
//! maps the half line onto the real line with a doubly exponentially
//! decaying integrand, so trapezoidal sums in `t` converge geometrically.
//! Each refinement halves the step and only visits the new midpoints,
//! until the sum stops changing at the working precision.

use hiprec_float::{Backend, Real};
use tracing::{debug, trace, warn};

use crate::error::QuadratureError;

/// Iteration caps of the integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadratureConfig {
    /// Maximum number of step halvings.
    pub max_refinements: usize,
    /// Maximum number of points visited by a single refinement.
    pub max_points_per_pass: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            max_refinements: 64,
            max_points_per_pass: 1 << 22,
        }
    }
}

impl QuadratureConfig {
    /// Sets the maximum number of step halvings.
    #[must_use]
    pub fn with_max_refinements(mut self, max_refinements: usize) -> Self {
        self.max_refinements = max_refinements;
        self
    }

    /// Sets the maximum number of points per refinement.
    #[must_use]
    pub fn with_max_points_per_pass(mut self, max_points_per_pass: usize) -> Self {
        self.max_points_per_pass = max_points_per_pass;
        self
    }
}

/// An integral estimate with the diagnostics of the run.
#[derive(Clone, Debug)]
pub struct QuadratureResult<T> {
    /// The integral estimate.
    pub value: T,
    /// Relative change produced by the last refinement.
    pub stability: T,
    /// Threshold the stability was compared against.
    pub threshold: T,
    /// Number of step halvings performed.
    pub refinements: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// Furthest `t` the inner passes advanced to, including the point
    /// where the last pass stopped.
    pub extreme: T,
}

/// Double-exponential integrator for a numeric backend.
///
/// # Example
///
/// ```
/// use hiprec_float::{PrecFloat, Precision};
/// use hiprec_quad::DoubleExponential;
///
/// let p = Precision::new(128).unwrap();
/// let result = DoubleExponential::new(p)
///     .integrate(|x: &PrecFloat| (-x).exp(), &p.zero())
///     .unwrap();
/// assert!((result.value - 1).abs() < p.epsilon() * 4096);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DoubleExponential<B: Backend> {
    backend: B,
    config: QuadratureConfig,
}

impl<B: Backend> DoubleExponential<B> {
    /// Creates an integrator with the default caps.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, QuadratureConfig::default())
    }

    /// Creates an integrator with explicit caps.
    #[must_use]
    pub fn with_config(backend: B, config: QuadratureConfig) -> Self {
        Self { backend, config }
    }

    /// Returns the numeric backend.
    #[must_use]
    pub fn backend(&self) -> B {
        self.backend
    }

    /// Returns the iteration caps.
    #[must_use]
    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    /// Estimates `∫ f(x) dx` over `[x_min, ∞)`.
    ///
    /// The attainable accuracy is set by the backend's precision; there is
    /// no tolerance parameter.
    ///
    /// An integrand that is negative in the tail converges much more
    /// slowly. Rounding toward negative infinity lets every tiny negative
    /// term lower the sum by one ulp, so an inner pass only stops once the
    /// jacobian underflows. Expect several times the evaluations of the
    /// positive integrand and an error of many ulps.
    ///
    /// # Errors
    ///
    /// - [`QuadratureError::NonFinite`] if the transformed integrand is
    ///   infinite or NaN at a visited point.
    /// - [`QuadratureError::PointBudgetExhausted`] if a refinement visits
    ///   more than `max_points_per_pass` points.
    /// - [`QuadratureError::NonConvergence`] if the estimate is not stable
    ///   after `max_refinements` halvings.
    pub fn integrate<F>(
        &self,
        mut f: F,
        x_min: &B::Real,
    ) -> Result<QuadratureResult<B::Real>, QuadratureError>
    where
        F: FnMut(&B::Real) -> B::Real,
    {
        let b = self.backend;
        let two = b.from_i64(2);
        let mut sampler = Sampler {
            f: &mut f,
            x_min,
            half_pi: b.pi() / two.clone(),
            one: b.one(),
            evaluations: 0,
        };

        let mut sum = sampler.at_zero()?.mul_int(2);
        let mut extreme = b.zero();
        let mut step = b.one();
        let mut threshold = b.epsilon().mul_int(10);
        let mut stability = b.zero();

        for refinement in 1..=self.config.max_refinements {
            let prec_sum = sum.clone();
            sum = sum / two.clone();

            let double_step = step.mul_int(2);
            let mut t = step.clone();
            let mut points = 0;
            loop {
                if points >= self.config.max_points_per_pass {
                    warn!(refinement, points, "double-exponential pass over budget");
                    return Err(QuadratureError::PointBudgetExhausted { refinement, points });
                }
                let (forward, backward) = sampler.pair(&t)?;
                points += 1;

                let new_sum = sum.clone() + (forward + backward) * step.clone();
                let converged = new_sum == sum;
                let beyond = t > extreme;
                let exit = converged && beyond;
                if beyond {
                    extreme = t.clone();
                    t = t + step.clone();
                } else {
                    t = t + double_step.clone();
                }
                sum = new_sum;
                if exit {
                    break;
                }
            }
            step = step / two.clone();

            stability = relative_change(b, &sum, &prec_sum);
            threshold = threshold.mul_int(2);
            debug!(
                refinement,
                points,
                step = step.to_f64(),
                stability = stability.to_f64(),
                threshold = threshold.to_f64(),
                "double-exponential refinement"
            );

            if stability <= threshold {
                trace!(
                    refinement,
                    evaluations = sampler.evaluations,
                    value = %sum,
                    "double-exponential quadrature converged"
                );
                return Ok(QuadratureResult {
                    value: sum,
                    stability,
                    threshold,
                    refinements: refinement,
                    evaluations: sampler.evaluations,
                    extreme,
                });
            }
        }

        warn!(
            refinements = self.config.max_refinements,
            stability = stability.to_f64(),
            "double-exponential quadrature did not converge"
        );
        Err(QuadratureError::NonConvergence {
            refinements: self.config.max_refinements,
            stability: stability.to_f64(),
        })
    }
}

/// `|sum/prec_sum - 1|`, zero when both vanish.
fn relative_change<B: Backend>(b: B, sum: &B::Real, prec_sum: &B::Real) -> B::Real {
    if prec_sum.is_zero() {
        return if sum.is_zero() {
            b.zero()
        } else {
            b.one() / b.zero()
        };
    }
    (sum.clone() / prec_sum.clone() - b.one()).abs()
}

/// Evaluates the transformed integrand.
struct Sampler<'a, T, F> {
    f: &'a mut F,
    x_min: &'a T,
    half_pi: T,
    one: T,
    evaluations: usize,
}

impl<T: Real, F: FnMut(&T) -> T> Sampler<'_, T, F> {
    fn at_zero(&mut self) -> Result<T, QuadratureError> {
        // sinh(0) = 0 and cosh(0) = 1, so x = x_min + 1.
        let one = self.one.clone();
        let jacobian = self.half_pi.clone();
        self.term(&one, jacobian, 0.0)
    }

    /// `(c(t), c(-t))` from a single `sinh_cosh` and exponential.
    fn pair(&mut self, t: &T) -> Result<(T, T), QuadratureError> {
        let (s, ch) = t.sinh_cosh();
        let e = (self.half_pi.clone() * s).exp();
        let e_inv = e.recip();
        let scale = self.half_pi.clone() * ch;
        let t_approx = t.to_f64();
        let forward = self.term(&e, scale.clone() * e.clone(), t_approx)?;
        let backward = self.term(&e_inv, scale * e_inv.clone(), -t_approx)?;
        Ok((forward, backward))
    }

    fn term(&mut self, e: &T, jacobian: T, t: f64) -> Result<T, QuadratureError> {
        let x = e.clone() + self.x_min.clone();
        let fx = (self.f)(&x);
        self.evaluations += 1;
        // The integrand vanishes where the jacobian overflows.
        if fx.is_zero() {
            return Ok(fx);
        }
        let value = fx * jacobian;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuadratureError::NonFinite { t })
        }
    }
}
