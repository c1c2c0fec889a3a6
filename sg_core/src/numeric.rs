//! Numeric policies - the substitutable arithmetic behind the gate graph.
//!
//! The same circuit topology runs over two representations:
//!
//! - [`f32`]: plain IEEE arithmetic with a saturating rectifier and a
//!   numerically stable sigmoid.
//! - [`Fixed`]: an `i8` scaled by 32 (5 fractional bits, `1.0 ≡ 32`),
//!   with truncating product rescale on the forward pass and
//!   two's-complement wraparound on overflow.
//!
//! The policy deliberately separates [`Numeric::mul`] (forward product,
//! rescaled into the representation) from [`Numeric::mul_grad`] (backward
//! multiply-accumulate term, *not* rescaled). Only the forward pass
//! rescales, and training dynamics depend on that asymmetry, so both
//! policies expose the two operations distinctly.

use std::fmt;

/// Scale factor of the fixed-point representation: `1.0 ≡ 32`.
pub const FIXED_SCALE: i32 = 32;

/// Arithmetic capability required by units, gates and circuits.
///
/// Implementations must keep every operation total over the representation;
/// overflow in the fixed-point policy wraps rather than erroring.
pub trait Numeric: Copy + PartialOrd + fmt::Debug + 'static {
    /// Additive identity; also the reset value for gradients.
    fn zero() -> Self;

    /// The gradient carrying a unit pull: `1.0` for the floating policy,
    /// one raw integer step for the fixed-point policy.
    fn grad_one() -> Self;

    /// Negation (used to turn a pull-up gradient into a pull-down one).
    fn neg(self) -> Self;

    /// Sum of two values.
    fn add(self, rhs: Self) -> Self;

    /// Forward-pass product, rescaled into the representation's range.
    fn mul(self, rhs: Self) -> Self;

    /// Backward-pass product used for gradient accumulation.
    ///
    /// For the fixed-point policy this is a plain integer product with no
    /// `/32` rescale, unlike [`Numeric::mul`].
    fn mul_grad(self, rhs: Self) -> Self;

    /// Saturating rectifier: clamps to `[0, 1]` in representation units.
    fn rectifier(self) -> Self;

    /// Sigmoid activation `1 / (1 + exp(-x))`.
    ///
    /// # Panics
    ///
    /// The fixed-point policy defines no sigmoid and panics if called.
    fn sigmoid(self) -> Self;

    /// Local derivative of the sigmoid at this pre-activation: `s * (1 - s)`.
    ///
    /// # Panics
    ///
    /// The fixed-point policy defines no sigmoid and panics if called.
    fn sigmoid_grad(self) -> Self;

    /// One gradient-ascent step applied to a parameter value.
    ///
    /// The step size lives here (0.01 for floating, 1 raw unit for
    /// fixed-point), as does the fixed-point policy's modulo-128 wraparound.
    fn step(self, grad: Self) -> Self;

    /// Score above which an example counts as positive: 0.7 of full scale.
    fn pull_up_threshold() -> Self;

    /// Score below which an example counts as negative: 0.3 of full scale.
    fn pull_down_threshold() -> Self;

    /// Map a real in `[0, 1]` into the representation.
    fn from_real(r: f32) -> Self;

    /// Map a representation value back to a real.
    fn to_real(self) -> f32;
}

/// Learning rate of the floating-point parameter update.
const FLOAT_STEP_SIZE: f32 = 0.01;

impl Numeric for f32 {
    fn zero() -> Self {
        0.0
    }

    fn grad_one() -> Self {
        1.0
    }

    fn neg(self) -> Self {
        -self
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn mul_grad(self, rhs: Self) -> Self {
        self * rhs
    }

    fn rectifier(self) -> Self {
        if self > 1.0 {
            1.0
        } else if self > 0.0 {
            self
        } else {
            0.0
        }
    }

    fn sigmoid(self) -> Self {
        // Branch on sign so the exponential never overflows.
        if self >= 0.0 {
            1.0 / (1.0 + (-self).exp())
        } else {
            let e = self.exp();
            e / (1.0 + e)
        }
    }

    fn sigmoid_grad(self) -> Self {
        let s = self.sigmoid();
        s * (1.0 - s)
    }

    fn step(self, grad: Self) -> Self {
        self + FLOAT_STEP_SIZE * grad
    }

    fn pull_up_threshold() -> Self {
        0.7
    }

    fn pull_down_threshold() -> Self {
        0.3
    }

    fn from_real(r: f32) -> Self {
        r
    }

    fn to_real(self) -> f32 {
        self
    }
}

/// Fixed-point value: an `i8` holding `real * 32`.
///
/// All arithmetic widens to `i32` and truncates back to `i8` on store,
/// which reproduces two's-complement wraparound on overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i8);

impl Fixed {
    /// Raw integer backing this value (`32` represents `1.0`).
    pub fn raw(self) -> i8 {
        self.0
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/32={:+.3}", self.0, self.to_real())
    }
}

impl Numeric for Fixed {
    fn zero() -> Self {
        Fixed(0)
    }

    fn grad_one() -> Self {
        Fixed(1)
    }

    fn neg(self) -> Self {
        Fixed((-(self.0 as i32)) as i8)
    }

    fn add(self, rhs: Self) -> Self {
        Fixed((self.0 as i32 + rhs.0 as i32) as i8)
    }

    fn mul(self, rhs: Self) -> Self {
        // The product of two scaled values carries scale^2; divide one
        // scale back out. Integer division truncates toward zero.
        Fixed((self.0 as i32 * rhs.0 as i32 / FIXED_SCALE) as i8)
    }

    fn mul_grad(self, rhs: Self) -> Self {
        // No rescale on the backward pass.
        Fixed((self.0 as i32 * rhs.0 as i32) as i8)
    }

    fn rectifier(self) -> Self {
        if self.0 > 32 {
            Fixed(32)
        } else if self.0 > 0 {
            self
        } else {
            Fixed(0)
        }
    }

    fn sigmoid(self) -> Self {
        panic!("the fixed-point policy defines no sigmoid; use the rectifier")
    }

    fn sigmoid_grad(self) -> Self {
        panic!("the fixed-point policy defines no sigmoid; use the rectifier")
    }

    fn step(self, grad: Self) -> Self {
        // Unit step size, then a truncating remainder by 128. The remainder
        // keeps the sign of the operand, so a wrapped-negative parameter
        // stays negative.
        let bumped = (self.0 as i32 + grad.0 as i32) as i8;
        Fixed((bumped as i32 % 128) as i8)
    }

    fn pull_up_threshold() -> Self {
        // 0.7 * 32, truncated.
        Fixed(22)
    }

    fn pull_down_threshold() -> Self {
        // 0.3 * 32, truncated.
        Fixed(9)
    }

    fn from_real(r: f32) -> Self {
        Fixed((FIXED_SCALE as f32 * r) as i8)
    }

    fn to_real(self) -> f32 {
        self.0 as f32 / FIXED_SCALE as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_rectifier_clamps_both_ends() {
        assert_eq!((-0.5f32).rectifier(), 0.0);
        assert_eq!(0.37f32.rectifier(), 0.37);
        assert_eq!(1.8f32.rectifier(), 1.0);
    }

    #[test]
    fn test_float_sigmoid_midpoint_and_stability() {
        assert!((0.0f32.sigmoid() - 0.5).abs() < 1e-6);
        // Large magnitudes must not produce NaN.
        assert!((100.0f32.sigmoid() - 1.0).abs() < 1e-6);
        assert!((-100.0f32).sigmoid().abs() < 1e-6);
        assert!((-100.0f32).sigmoid_grad().is_finite());
    }

    #[test]
    fn test_float_step() {
        let v = 0.3f32.step(1.0);
        assert!((v - 0.31).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_mul_rescales() {
        // 0.5 * 0.5 = 0.25 on the fixed-point grid: 16*16/32 = 8.
        let half = Fixed::from_real(0.5);
        assert_eq!(half, Fixed(16));
        assert_eq!(half.mul(half), Fixed::from_real(0.25));
    }

    #[test]
    fn test_fixed_mul_truncates_toward_zero() {
        // 3 * 3 / 32 = 0 (not rounded up), and sign truncates toward zero.
        assert_eq!(Fixed(3).mul(Fixed(3)), Fixed(0));
        assert_eq!(Fixed(-3).mul(Fixed(3)), Fixed(0));
        assert_eq!(Fixed(-33).mul(Fixed(1)), Fixed(-1));
    }

    #[test]
    fn test_fixed_mul_grad_does_not_rescale() {
        // Backward products stay at the raw integer scale.
        assert_eq!(Fixed(3).mul_grad(Fixed(3)), Fixed(9));
        assert_eq!(Fixed(16).mul_grad(Fixed(2)), Fixed(32));
    }

    #[test]
    fn test_fixed_add_wraps() {
        // 100 + 100 = 200 → wraps to -56 as an i8.
        assert_eq!(Fixed(100).add(Fixed(100)), Fixed(-56));
    }

    #[test]
    fn test_fixed_rectifier_clamps_to_scale() {
        assert_eq!(Fixed(-5).rectifier(), Fixed(0));
        assert_eq!(Fixed(18).rectifier(), Fixed(18));
        assert_eq!(Fixed(40).rectifier(), Fixed(32));
    }

    #[test]
    fn test_fixed_step_wraps_with_truncating_remainder() {
        // Ordinary step.
        assert_eq!(Fixed(10).step(Fixed(3)), Fixed(13));
        // 120 + 10 wraps to -126 as an i8; the truncating remainder keeps
        // the negative sign rather than folding back into [0, 127].
        assert_eq!(Fixed(120).step(Fixed(10)), Fixed(-126));
        // -128 is the one value the remainder maps elsewhere.
        assert_eq!(Fixed(-127).step(Fixed(-1)), Fixed(0));
    }

    #[test]
    fn test_fixed_thresholds() {
        assert_eq!(Fixed::pull_up_threshold(), Fixed(22));
        assert_eq!(Fixed::pull_down_threshold(), Fixed(9));
    }

    #[test]
    fn test_fixed_real_round_trip() {
        assert_eq!(Fixed::from_real(0.0), Fixed(0));
        assert_eq!(Fixed::from_real(1.0), Fixed(32));
        // Truncation, not rounding: 0.2 * 32 = 6.4 → 6.
        assert_eq!(Fixed::from_real(0.2), Fixed(6));
        assert!((Fixed(16).to_real() - 0.5).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "no sigmoid")]
    fn test_fixed_sigmoid_panics() {
        let _ = Fixed(10).sigmoid();
    }
}
