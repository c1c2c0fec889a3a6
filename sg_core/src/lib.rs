//! # sg_core - Scalar gate-graph reverse-mode autodiff
//!
//! This crate provides the differentiable core of a tiny gate-composed
//! classifier: scalar [`Unit`]s carrying a value/gradient pair, a closed set
//! of atomic [`Gate`]s (multiply, add, saturating rectifier, sigmoid), and a
//! fixed-topology [`Circuit`] computing `activation(a*x + b*y + c)`.
//!
//! ## Numeric policies
//!
//! The whole graph is generic over a [`Numeric`] policy, instantiated twice:
//!
//! - `f32` — plain IEEE arithmetic, step size 0.01.
//! - [`Fixed`] — an `i8` scaled by 32 (5 fractional bits), with truncating
//!   product rescale on the forward pass, *un*-rescaled gradient products on
//!   the backward pass, and wraparound instead of overflow checking.
//!
//! The fixed-point policy keeps the wraparound and truncation quirks of the
//! scaled-integer representation; see the [`Numeric`] docs for the details.
//!
//! ## Quick Start
//!
//! ```
//! use sg_core::{Circuit, Unit};
//!
//! let mut circuit = Circuit::new();
//! let mut x = Unit::new(0.1f32);
//! let mut y = Unit::new(0.2f32);
//! let mut a = Unit::new(0.3f32);
//! let mut b = Unit::new(0.4f32);
//! let mut c = Unit::new(0.5f32);
//!
//! // activation(a*x + b*y + c) = rectifier(0.61) = 0.61
//! let out = circuit.forward(&x, &y, &a, &b, &c);
//! assert!((out.value - 0.61).abs() < 1e-6);
//!
//! // Pull the output up and read the accumulated gradients.
//! circuit.backward(1.0, &mut x, &mut y, &mut a, &mut b, &mut c);
//! assert!((a.grad - 0.1).abs() < 1e-6); // d out / d a = x
//! assert!((c.grad - 1.0).abs() < 1e-6);
//! ```

mod circuit;
mod gate;
mod numeric;
mod unit;

pub use circuit::Circuit;
pub use gate::Gate;
pub use numeric::{Fixed, Numeric, FIXED_SCALE};
pub use unit::Unit;
