//! Two-layer gate-circuit classifier.

use rand::Rng;

use sg_core::{Circuit, Numeric, Unit};

/// Binary label of a training example.
pub type Label = u8;

/// SVM-style binary classifier built from three [`Circuit`]s.
///
/// `circuit1` and `circuit2` each compute a score from the raw inputs; their
/// outputs feed `circuit3` as its `x`/`y`, and circuit3's output is the
/// prediction. Nine parameter units (`a`, `b`, `c` per circuit) are the only
/// state that persists and learns across calls.
///
/// Training uses a discrete pull signal rather than a loss gradient: the
/// output is pushed up when a positive example scores below 0.7 of full
/// scale, pushed down when a negative example scores above 0.3, and left
/// alone otherwise. The same raw pull is fed to all three circuits' backward
/// passes; the layer-one circuits do not receive a gradient chained through
/// circuit3, so this is not exact backpropagation through the composition.
#[derive(Clone, Debug)]
pub struct Classifier<P: Numeric> {
    a1: Unit<P>,
    b1: Unit<P>,
    c1: Unit<P>,

    a2: Unit<P>,
    b2: Unit<P>,
    c2: Unit<P>,

    a3: Unit<P>,
    b3: Unit<P>,
    c3: Unit<P>,

    circuit1: Circuit<P>,
    circuit2: Circuit<P>,
    circuit3: Circuit<P>,

    // Scratch copies of the last forward pass, so backward can accumulate
    // input gradients without aliasing the caller's units.
    in_x: Unit<P>,
    in_y: Unit<P>,
    c1_out: Unit<P>,
    c2_out: Unit<P>,
    out: Unit<P>,
}

impl<P: Numeric> Classifier<P> {
    /// Allocate the three circuits and draw the nine parameters uniformly
    /// from `[0, 1]`, mapped into the active representation.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut param = || Unit::<P>::from_real(rng.gen::<f32>());
        Classifier {
            a1: param(),
            b1: param(),
            c1: param(),
            a2: param(),
            b2: param(),
            c2: param(),
            a3: param(),
            b3: param(),
            c3: param(),
            circuit1: Circuit::new(),
            circuit2: Circuit::new(),
            circuit3: Circuit::new(),
            in_x: Unit::default(),
            in_y: Unit::default(),
            c1_out: Unit::default(),
            c2_out: Unit::default(),
            out: Unit::default(),
        }
    }

    /// Compute the prediction for one input pair.
    pub fn forward(&mut self, x: Unit<P>, y: Unit<P>) -> Unit<P> {
        self.in_x = x;
        self.in_y = y;
        self.c1_out = self
            .circuit1
            .forward(&self.in_x, &self.in_y, &self.a1, &self.b1, &self.c1);
        self.c2_out = self
            .circuit2
            .forward(&self.in_x, &self.in_y, &self.a2, &self.b2, &self.c2);
        self.out = self
            .circuit3
            .forward(&self.c1_out, &self.c2_out, &self.a3, &self.b3, &self.c3);
        self.out
    }

    /// Zero the parameter gradients, derive the pull signal from the last
    /// prediction, and run all three circuits' backward passes with it.
    pub fn backward(&mut self, label: Label) {
        for p in [
            &mut self.a1,
            &mut self.b1,
            &mut self.c1,
            &mut self.a2,
            &mut self.b2,
            &mut self.c2,
            &mut self.a3,
            &mut self.b3,
            &mut self.c3,
        ] {
            p.zero_grad();
        }

        let gradient_top = self.pull(label);

        self.circuit3.backward(
            gradient_top,
            &mut self.c1_out,
            &mut self.c2_out,
            &mut self.a3,
            &mut self.b3,
            &mut self.c3,
        );
        self.circuit2.backward(
            gradient_top,
            &mut self.in_x,
            &mut self.in_y,
            &mut self.a2,
            &mut self.b2,
            &mut self.c2,
        );
        self.circuit1.backward(
            gradient_top,
            &mut self.in_x,
            &mut self.in_y,
            &mut self.a1,
            &mut self.b1,
            &mut self.c1,
        );
    }

    /// Discrete pull for the last prediction: up when a positive example
    /// scores below the positive threshold, down when a negative example
    /// scores above the negative threshold, zero otherwise.
    fn pull(&self, label: Label) -> P {
        if label == 1 && self.out.value < P::pull_up_threshold() {
            P::grad_one()
        } else if label == 0 && self.out.value > P::pull_down_threshold() {
            P::grad_one().neg()
        } else {
            P::zero()
        }
    }

    /// Apply one fixed-step gradient-ascent update to every parameter.
    pub fn update(&mut self) {
        for p in self.params_mut() {
            p.value = p.value.step(p.grad);
        }
    }

    /// One training step: forward, backward, update.
    pub fn learn_from(&mut self, x: Unit<P>, y: Unit<P>, label: Label) {
        self.forward(x, y);
        self.backward(label);
        self.update();
    }

    /// Fraction of examples the classifier gets right, using the same
    /// positive threshold as the pull computation.
    pub fn evaluate_accuracy(&mut self, examples: &[(P, P, Label)]) -> f32 {
        if examples.is_empty() {
            return 0.0;
        }
        let mut num_correct = 0usize;
        for &(x, y, label) in examples {
            let out = self.forward(Unit::new(x), Unit::new(y));
            if self.classify(out.value) == label {
                num_correct += 1;
            }
        }
        num_correct as f32 / examples.len() as f32
    }

    /// Turn a raw score into a label with the positive threshold.
    pub fn classify(&self, score: P) -> Label {
        if score > P::pull_up_threshold() {
            1
        } else {
            0
        }
    }

    /// Real-valued snapshot of the nine parameters, circuit by circuit,
    /// in `a, b, c` order. Intended for logging.
    pub fn parameters(&self) -> [f32; 9] {
        [
            self.a1.value.to_real(),
            self.b1.value.to_real(),
            self.c1.value.to_real(),
            self.a2.value.to_real(),
            self.b2.value.to_real(),
            self.c2.value.to_real(),
            self.a3.value.to_real(),
            self.b3.value.to_real(),
            self.c3.value.to_real(),
        ]
    }

    /// The nine parameter values in the active representation, circuit by
    /// circuit, in `a, b, c` order.
    pub fn parameter_values(&self) -> [P; 9] {
        [
            self.a1.value,
            self.b1.value,
            self.c1.value,
            self.a2.value,
            self.b2.value,
            self.c2.value,
            self.a3.value,
            self.b3.value,
            self.c3.value,
        ]
    }

    fn params_mut(&mut self) -> [&mut Unit<P>; 9] {
        [
            &mut self.a1,
            &mut self.b1,
            &mut self.c1,
            &mut self.a2,
            &mut self.b2,
            &mut self.c2,
            &mut self.a3,
            &mut self.b3,
            &mut self.c3,
        ]
    }

    #[cfg(test)]
    fn param_grads(&self) -> [P; 9] {
        [
            self.a1.grad, self.b1.grad, self.c1.grad, self.a2.grad, self.b2.grad,
            self.c2.grad, self.a3.grad, self.b3.grad, self.c3.grad,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sg_core::Fixed;

    fn classifier_f32(seed: u64) -> Classifier<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        Classifier::new(&mut rng)
    }

    #[test]
    fn test_new_draws_parameters_in_unit_range() {
        let clf = classifier_f32(1);
        for p in clf.parameters() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_forward_composes_circuits() {
        let mut clf = classifier_f32(2);
        let out = clf.forward(Unit::new(0.5), Unit::new(0.5));

        // The prediction is circuit3 applied to the two layer-one outputs.
        let [a3, b3, c3] = [clf.a3.value, clf.b3.value, clf.c3.value];
        let expected =
            (a3 * clf.c1_out.value + b3 * clf.c2_out.value + c3).rectifier();
        assert!((out.value - expected).abs() < 1e-6);
    }

    #[test]
    fn test_backward_zeroes_then_accumulates_param_grads() {
        let mut clf = classifier_f32(3);
        clf.a1.grad = 99.0;

        clf.forward(Unit::new(0.1), Unit::new(0.1));
        // A confident-zero example far below 0.3 gives pull 0 when label=0;
        // force a pull by choosing the label against the score.
        let out = clf.out.value;
        let label = if out < 0.7 { 1 } else { 0 };
        clf.backward(label);

        // The stale gradient must be gone regardless of the pull.
        assert!(clf.a1.grad.abs() < 99.0);
    }

    #[test]
    fn test_pull_is_zero_inside_the_margin() {
        let mut clf = classifier_f32(4);
        clf.forward(Unit::new(0.5), Unit::new(0.5));

        // Fake a comfortably classified score and check no gradient flows.
        clf.out.value = 0.9;
        clf.backward(1);
        assert_eq!(clf.param_grads(), [0.0; 9]);

        clf.out.value = 0.1;
        clf.backward(0);
        assert_eq!(clf.param_grads(), [0.0; 9]);
    }

    #[test]
    fn test_pull_signs() {
        let mut clf = classifier_f32(5);
        clf.forward(Unit::new(0.5), Unit::new(0.5));

        clf.out.value = 0.2;
        assert_eq!(clf.pull(1), 1.0);
        clf.out.value = 0.8;
        assert_eq!(clf.pull(0), -1.0);
    }

    #[test]
    fn test_update_moves_along_the_gradient() {
        let mut clf = classifier_f32(6);
        let before = clf.c3.value;
        clf.c3.grad = 1.0;
        clf.update();
        assert!((clf.c3.value - (before + 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_layer_one_receives_raw_pull_not_chained_gradient() {
        // Park circuit3 in a dead region (negative pre-activation) so a true
        // chain rule would deliver zero gradient to layer one; the raw-pull
        // wiring still moves the layer-one parameters.
        let mut clf = classifier_f32(7);
        clf.a3 = Unit::new(0.0);
        clf.b3 = Unit::new(0.0);
        clf.c3 = Unit::new(-1.0);

        clf.forward(Unit::new(0.5), Unit::new(0.5));
        assert_eq!(clf.out.value, 0.0);
        clf.backward(1);

        // circuit1's bias sees the full pull.
        assert_eq!(clf.c1.grad, 1.0);
        assert_eq!(clf.c2.grad, 1.0);
        // circuit3's bias sees nothing (rectifier gradient is zero there).
        assert_eq!(clf.c3.grad, 0.0);
    }

    #[test]
    fn test_fixed_update_wraps_modulo_128() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut clf: Classifier<Fixed> = Classifier::new(&mut rng);

        clf.a1 = Unit::new(Fixed(120));
        clf.a1.grad = Fixed(10);
        clf.update();
        assert_eq!(clf.a1.value, Fixed(-126));
    }

    #[test]
    fn test_evaluate_accuracy_counts_threshold_hits() {
        let mut clf = classifier_f32(9);
        // Degenerate parameters collapsing the net to a constant 1.0 score:
        // every positive label is correct, every negative one wrong.
        for p in clf.params_mut() {
            *p = Unit::new(0.0);
        }
        clf.c3 = Unit::new(1.0);

        // Score 1.0 is above the 0.7 threshold -> label 1 always.
        let examples = [(0.0f32, 0.0, 1), (1.0, 1.0, 1), (0.0, 1.0, 0), (1.0, 0.0, 0)];
        let acc = clf.evaluate_accuracy(&examples);
        assert!((acc - 0.5).abs() < 1e-6);
    }
}
