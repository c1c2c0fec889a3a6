//! XOR training demo.
//!
//! Trains the two-layer gate-circuit classifier on the XOR function twice:
//! once over IEEE floats and once over the 5-bit fixed-point policy, each
//! with restart-until-learned, then reports accuracy and the learned
//! parameters. Set `RUST_LOG=debug` for per-restart progress.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sg_core::{Fixed, Numeric};
use sg_nn::{corner_examples, evaluate_jittered, train_steps, Classifier};

const STEPS_PER_RESTART: usize = 100_000;
const MAX_RESTARTS: u32 = 50;
const JITTER_TRIALS: usize = 100_000;

fn main() {
    env_logger::init();

    let seed = match std::env::var("SG_SEED") {
        Ok(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("SG_SEED {:?} is not a number, using a random seed", s);
            rand::thread_rng().gen()
        }),
        Err(_) => rand::thread_rng().gen(),
    };
    println!("=== Gate-circuit XOR demo (seed {}) ===\n", seed);

    let mut rng = StdRng::seed_from_u64(seed);

    println!("--- floating-point policy ---");
    run::<f32, _>(&mut rng);

    println!("\n--- fixed-point policy (i8, scale 32) ---");
    run::<Fixed, _>(&mut rng);
}

/// Train with restarts, then report corner and jittered accuracy.
fn run<P: Numeric + std::fmt::Display, R: Rng>(rng: &mut R) {
    let corners = corner_examples::<P>();
    let mut restarts = 0u32;

    let mut classifier = loop {
        restarts += 1;
        let mut classifier = Classifier::<P>::new(rng);
        train_steps(&mut classifier, STEPS_PER_RESTART, rng);

        let accuracy = classifier.evaluate_accuracy(&corners);
        log::debug!("restart {}: corner accuracy {:.2}", restarts, accuracy);

        if accuracy >= 1.0 || restarts >= MAX_RESTARTS {
            if accuracy < 1.0 {
                log::warn!(
                    "giving up after {} restarts at accuracy {:.2}",
                    restarts,
                    accuracy
                );
            }
            break classifier;
        }
    };

    let corner_accuracy = classifier.evaluate_accuracy(&corners);
    let jittered_accuracy = evaluate_jittered(&mut classifier, JITTER_TRIALS, rng);

    println!("restarts:          {}", restarts);
    println!("corner accuracy:   {:.2}", corner_accuracy);
    println!(
        "jittered accuracy: {:.4} over {} draws",
        jittered_accuracy, JITTER_TRIALS
    );

    println!("parameters (a, b, c per circuit):");
    let params = classifier.parameter_values();
    for (i, triple) in params.chunks(3).enumerate() {
        let row: Vec<String> = triple.iter().map(|p| p.to_string()).collect();
        println!("  circuit{}: {}", i + 1, row.join(", "));
    }
}
