//! Atomic differentiable gates.
//!
//! The gate set is closed: the circuit topology never changes at runtime, so
//! gates are tagged variants dispatched through a single forward/backward
//! interface rather than an open trait.
//!
//! `forward` returns a fresh output [`Unit`] with a zeroed gradient;
//! `backward` reads the output's gradient and accumulates into the input
//! units' gradients. Gradients are only ever added to, never overwritten,
//! so a unit feeding several gates collects every contribution.

use crate::numeric::Numeric;
use crate::unit::Unit;

/// The closed set of gate operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Product of two units, rescaled into the representation.
    Multiply,
    /// Sum of two units.
    Add,
    /// Saturating rectifier of one unit.
    Rectifier,
    /// Sigmoid of one unit (floating policy only).
    Sigmoid,
}

impl Gate {
    /// Number of input units this gate consumes.
    pub fn arity(self) -> usize {
        match self {
            Gate::Multiply | Gate::Add => 2,
            Gate::Rectifier | Gate::Sigmoid => 1,
        }
    }

    /// Compute the gate's output for the given inputs.
    ///
    /// The returned unit carries a zero gradient; the consumer (the next
    /// gate's backward pass, or the top-level caller) sets it later.
    pub fn forward<P: Numeric>(self, inputs: &[Unit<P>]) -> Unit<P> {
        debug_assert_eq!(inputs.len(), self.arity());
        let value = match self {
            Gate::Multiply => inputs[0].value.mul(inputs[1].value),
            Gate::Add => inputs[0].value.add(inputs[1].value),
            Gate::Rectifier => inputs[0].value.rectifier(),
            Gate::Sigmoid => inputs[0].value.sigmoid(),
        };
        Unit::new(value)
    }

    /// Accumulate this gate's contribution into its inputs' gradients.
    ///
    /// `out` must be the unit produced by the matching `forward` call, with
    /// its gradient already set by the consumer; `inputs` must be the same
    /// units that fed that forward call.
    pub fn backward<P: Numeric>(self, out: &Unit<P>, inputs: &mut [&mut Unit<P>]) {
        debug_assert_eq!(inputs.len(), self.arity());
        let g = out.grad;
        match self {
            Gate::Multiply => {
                let v0 = inputs[0].value;
                let v1 = inputs[1].value;
                // Product rule; note the un-rescaled mul_grad.
                inputs[0].grad = inputs[0].grad.add(v1.mul_grad(g));
                inputs[1].grad = inputs[1].grad.add(v0.mul_grad(g));
            }
            Gate::Add => {
                inputs[0].grad = inputs[0].grad.add(g);
                inputs[1].grad = inputs[1].grad.add(g);
            }
            Gate::Rectifier => {
                // Step gradient at zero. The upper saturation does not zero
                // the gradient: any positive pre-activation passes g through.
                let s = inputs[0].value.rectifier();
                if s > P::zero() {
                    inputs[0].grad = inputs[0].grad.add(g);
                }
            }
            Gate::Sigmoid => {
                let local = inputs[0].value.sigmoid_grad();
                inputs[0].grad = inputs[0].grad.add(local.mul_grad(g));
            }
        }
    }
}
