//! # hiprec
//!
//! Arbitrary precision real arithmetic in Rust.
//!
//! ## Features
//!
//! - **Explicit precision**: every value carries the bit count it was
//!   allocated at and rounds toward negative infinity
//! - **Transcendentals**: exponentials, logarithms, trigonometric,
//!   hyperbolic and error functions
//! - **Quadrature**: double-exponential integration over half lines and
//!   the whole real line
//! - **Linear algebra**: dense matrices and vectors over the same scalar
//!
//! ## Quick Start
//!
//! ```
//! use hiprec::prelude::*;
//!
//! let p = Precision::new(256).unwrap();
//! let result = DoubleExponential::new(p)
//!     .integrate(|x: &PrecFloat| (-x.sqr()).exp(), &p.zero())
//!     .unwrap();
//! // ∫₀^∞ e^(-x²) dx = √π / 2
//! let exact = p.pi().sqrt() / 2;
//! assert!((result.value / exact - 1).abs() < p.epsilon() * (1i64 << 20));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use hiprec_float as float;
pub use hiprec_linalg as linalg;
pub use hiprec_quad as quad;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use hiprec_float::{
        default_precision, digit_count, epsilon, set_default_precision, Backend, FloatError,
        Native, Notation, PrecFloat, Precision, Real,
    };
    pub use hiprec_linalg::{DenseMatrix, DenseVector, PrecMatrix, PrecVector, Scalar};
    pub use hiprec_quad::{
        integrate_from_neg_infinity, integrate_from_zero, integrate_full_line,
        integrate_to_infinity, DoubleExponential, QuadratureConfig, QuadratureError,
        QuadratureResult,
    };
}
