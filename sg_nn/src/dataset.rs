//! The XOR training set and its jittered input sampling.

use rand::Rng;

use sg_core::Numeric;

use crate::classifier::Label;

/// The four XOR corners as `([x_bit, y_bit], label)`.
pub const XOR_TRUTH: [([u8; 2], Label); 4] =
    [([0, 0], 0), ([0, 1], 1), ([1, 0], 1), ([1, 1], 0)];

/// Draw a jittered input value for one bit: uniform in `[0, 0.3)` for a
/// zero bit and `[0.7, 1.0)` for a one bit, mapped into the policy.
pub fn jitter<P: Numeric, R: Rng>(rng: &mut R, bit: u8) -> P {
    let r = if bit == 0 {
        rng.gen_range(0.0..0.3f32)
    } else {
        rng.gen_range(0.7..1.0f32)
    };
    P::from_real(r)
}

/// The exact XOR corners as evaluation examples in the active policy.
pub fn corner_examples<P: Numeric>() -> [(P, P, Label); 4] {
    XOR_TRUTH.map(|([x, y], label)| {
        (P::from_real(x as f32), P::from_real(y as f32), label)
    })
}
