//! Quadrature failures.

use thiserror::Error;

/// Errors raised when an integral cannot be estimated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QuadratureError {
    /// The outer refinement loop hit its cap before the estimate became
    /// stable.
    #[error("no convergence after {refinements} refinements (stability {stability:e})")]
    NonConvergence {
        /// Refinements performed.
        refinements: usize,
        /// Relative change of the last refinement.
        stability: f64,
    },

    /// An inner pass kept changing the sum for more points than allowed,
    /// which happens for divergent integrands.
    #[error("refinement {refinement} exceeded the budget of {points} points")]
    PointBudgetExhausted {
        /// The refinement that overran.
        refinement: usize,
        /// Points evaluated in that refinement.
        points: usize,
    },

    /// The transformed integrand was infinite or NaN.
    #[error("integrand is not finite at t = {t}")]
    NonFinite {
        /// Abscissa of the transformed variable.
        t: f64,
    },
}
