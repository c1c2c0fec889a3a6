//! # sg_nn - A two-layer gate-circuit classifier that learns XOR
//!
//! This crate wires three `sg_core` circuits into a tiny SVM-style binary
//! classifier and provides the training machinery around it:
//!
//! - **[`Classifier`]**: two layer-one circuits feeding a third, with nine
//!   trainable parameters and a margin-based pull signal instead of a loss.
//! - **[`dataset`]**: the XOR truth table and jittered input sampling.
//! - **[`train`]**: random-corner training steps, jittered evaluation, and
//!   the restart-until-learned wrapper.
//!
//! Everything is generic over the `sg_core::Numeric` policy, so the same
//! classifier trains in IEEE floats or in 5-bit fixed point.
//!
//! ## Example: one training step
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use sg_core::Unit;
//! use sg_nn::Classifier;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut classifier: Classifier<f32> = Classifier::new(&mut rng);
//!
//! let before = classifier.forward(Unit::new(0.9), Unit::new(0.1)).value;
//! classifier.learn_from(Unit::new(0.9), Unit::new(0.1), 1);
//! let after = classifier.forward(Unit::new(0.9), Unit::new(0.1)).value;
//!
//! // A positive example below the margin pulls the score up (or leaves it
//! // if the rectifier blocked every gradient path).
//! assert!(after >= before - 1e-6);
//! ```

pub mod classifier;
pub mod dataset;
pub mod train;

pub use classifier::{Classifier, Label};
pub use dataset::{corner_examples, jitter, XOR_TRUTH};
pub use train::{evaluate_jittered, train_steps, train_until_learned, Trained};
