//! Training-loop helpers: random-corner step sampling, jittered evaluation,
//! and the restart-until-learned wrapper.

use rand::Rng;

use sg_core::{Numeric, Unit};

use crate::classifier::Classifier;
use crate::dataset::{corner_examples, jitter, XOR_TRUTH};

/// Run `steps` training steps, each on a random XOR corner with jittered
/// inputs.
pub fn train_steps<P: Numeric, R: Rng>(
    classifier: &mut Classifier<P>,
    steps: usize,
    rng: &mut R,
) {
    for _ in 0..steps {
        let ([x_bit, y_bit], label) = XOR_TRUTH[rng.gen_range(0..XOR_TRUTH.len())];
        let x = Unit::new(jitter(rng, x_bit));
        let y = Unit::new(jitter(rng, y_bit));
        classifier.learn_from(x, y, label);
    }
}

/// Fraction of `trials` jittered inputs classified correctly, cycling
/// through the four corners in order.
pub fn evaluate_jittered<P: Numeric, R: Rng>(
    classifier: &mut Classifier<P>,
    trials: usize,
    rng: &mut R,
) -> f32 {
    if trials == 0 {
        return 0.0;
    }
    let mut num_correct = 0usize;
    for iter in 0..trials {
        let ([x_bit, y_bit], label) = XOR_TRUTH[iter % XOR_TRUTH.len()];
        let x = Unit::new(jitter(rng, x_bit));
        let y = Unit::new(jitter(rng, y_bit));
        let out = classifier.forward(x, y);
        if classifier.classify(out.value) == label {
            num_correct += 1;
        }
    }
    num_correct as f32 / trials as f32
}

/// Result of [`train_until_learned`].
pub struct Trained<P: Numeric> {
    /// The best classifier seen across restarts.
    pub classifier: Classifier<P>,
    /// Its accuracy on the exact XOR corners.
    pub accuracy: f32,
    /// How many restarts were consumed (1 = the first initialization won).
    pub restarts: u32,
}

/// Train freshly initialized classifiers until one classifies all four XOR
/// corners correctly, or `max_restarts` is exhausted.
///
/// Whether a given random initialization converges is luck, so the wrapper
/// brute-forces fresh initializations against the corner set. The best
/// classifier seen is returned even when no restart reaches full accuracy.
pub fn train_until_learned<P: Numeric, R: Rng>(
    steps_per_restart: usize,
    max_restarts: u32,
    rng: &mut R,
) -> Trained<P> {
    assert!(max_restarts >= 1, "at least one restart is required");

    let corners = corner_examples::<P>();
    let mut best: Option<(Classifier<P>, f32)> = None;

    for restart in 1..=max_restarts {
        let mut classifier = Classifier::new(rng);
        train_steps(&mut classifier, steps_per_restart, rng);
        let accuracy = classifier.evaluate_accuracy(&corners);

        if accuracy >= 1.0 {
            return Trained {
                classifier,
                accuracy,
                restarts: restart,
            };
        }
        if best.as_ref().map_or(true, |(_, b)| accuracy > *b) {
            best = Some((classifier, accuracy));
        }
    }

    let (classifier, accuracy) = best.expect("loop ran at least once");
    Trained {
        classifier,
        accuracy,
        restarts: max_restarts,
    }
}
