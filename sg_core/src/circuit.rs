//! A fixed five-gate circuit computing `activation(a*x + b*y + c)`.

use crate::gate::Gate;
use crate::numeric::Numeric;
use crate::unit::Unit;

/// Fixed-topology circuit: two multiplies, two adds, one activation.
///
/// The circuit owns its gates and the intermediate units they produce
/// (`ax`, `by`, `axpby`, `axpbypc`, `out`); parameters and inputs are
/// borrowed per call and may be shared across circuits. A forward pass
/// overwrites every cached unit, so output units must not be retained
/// across passes.
#[derive(Clone, Debug)]
pub struct Circuit<P: Numeric> {
    mul0: Gate,
    mul1: Gate,
    add0: Gate,
    add1: Gate,
    act: Gate,

    ax: Unit<P>,
    by: Unit<P>,
    axpby: Unit<P>,
    axpbypc: Unit<P>,
    out: Unit<P>,
}

impl<P: Numeric> Circuit<P> {
    /// Circuit with the saturating rectifier as its activation.
    pub fn new() -> Self {
        Circuit::with_activation(Gate::Rectifier)
    }

    /// Circuit with an explicit unary activation gate.
    ///
    /// `Gate::Sigmoid` is only usable with the floating policy.
    pub fn with_activation(act: Gate) -> Self {
        debug_assert_eq!(act.arity(), 1, "activation gate must be unary");
        Circuit {
            mul0: Gate::Multiply,
            mul1: Gate::Multiply,
            add0: Gate::Add,
            add1: Gate::Add,
            act,
            ax: Unit::default(),
            by: Unit::default(),
            axpby: Unit::default(),
            axpbypc: Unit::default(),
            out: Unit::default(),
        }
    }

    /// Run the five gates in topological order and return the output unit.
    pub fn forward(
        &mut self,
        x: &Unit<P>,
        y: &Unit<P>,
        a: &Unit<P>,
        b: &Unit<P>,
        c: &Unit<P>,
    ) -> Unit<P> {
        self.ax = self.mul0.forward(&[*a, *x]);
        self.by = self.mul1.forward(&[*b, *y]);
        self.axpby = self.add0.forward(&[self.ax, self.by]);
        self.axpbypc = self.add1.forward(&[self.axpby, *c]);
        self.out = self.act.forward(&[self.axpbypc]);
        self.out
    }

    /// Seed the output gradient and run the gates in reverse topological
    /// order, accumulating into the borrowed parameter and input units.
    ///
    /// The order is load-bearing: the gradient must reach `axpbypc` before
    /// `axpby` and `c`, and `axpby` before `ax` and `by`.
    pub fn backward(
        &mut self,
        gradient_top: P,
        x: &mut Unit<P>,
        y: &mut Unit<P>,
        a: &mut Unit<P>,
        b: &mut Unit<P>,
        c: &mut Unit<P>,
    ) {
        self.out.grad = gradient_top;

        let out = self.out;
        self.act.backward(&out, &mut [&mut self.axpbypc]);

        let axpbypc = self.axpbypc;
        self.add1.backward(&axpbypc, &mut [&mut self.axpby, c]);

        let axpby = self.axpby;
        self.add0.backward(&axpby, &mut [&mut self.ax, &mut self.by]);

        let by = self.by;
        self.mul1.backward(&by, &mut [b, y]);

        let ax = self.ax;
        self.mul0.backward(&ax, &mut [a, x]);
    }

    /// The unit produced by the most recent forward pass.
    pub fn output(&self) -> Unit<P> {
        self.out
    }
}

impl<P: Numeric> Default for Circuit<P> {
    fn default() -> Self {
        Circuit::new()
    }
}
