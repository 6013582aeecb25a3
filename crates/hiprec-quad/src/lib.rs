//! # hiprec-quad
//!
//! Double-exponential quadrature over semi-infinite intervals, generic over
//! the numeric [`Backend`](hiprec_float::Backend).
//!
//! The accuracy of an estimate is controlled by the working precision:
//! raising the precision of the backend raises the attainable accuracy.
//!
//! ## Example
//!
//! ```
//! use hiprec_float::Native;
//! use hiprec_quad::DoubleExponential;
//!
//! // ∫₀^∞ x e^(-x) dx = 1
//! let result = DoubleExponential::new(Native)
//!     .integrate(|x: &f64| x * (-x).exp(), &0.0)
//!     .unwrap();
//! assert!((result.value - 1.0).abs() < 1e-13);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod double_exponential;
mod error;
pub mod improper;


pub use double_exponential::{DoubleExponential, QuadratureConfig, QuadratureResult};
pub use error::QuadratureError;
pub use improper::{
    integrate_from_neg_infinity, integrate_from_zero, integrate_full_line, integrate_to_infinity,
};
