//! The edge type of the gate graph: a scalar value paired with its gradient.

use crate::numeric::Numeric;

/// A scalar value/gradient pair.
///
/// Units are plain copyable data. Intermediate units are created fresh on
/// every forward pass with a zeroed gradient; parameter units persist across
/// training steps and accumulate gradients during the backward pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit<P: Numeric> {
    pub value: P,
    pub grad: P,
}

impl<P: Numeric> Unit<P> {
    /// A unit with the given value and a zero gradient.
    pub fn new(value: P) -> Self {
        Unit {
            value,
            grad: P::zero(),
        }
    }

    /// A unit whose value is drawn from a real in `[0, 1]`.
    pub fn from_real(r: f32) -> Self {
        Unit::new(P::from_real(r))
    }

    /// Reset the gradient to zero ahead of a backward pass.
    pub fn zero_grad(&mut self) {
        self.grad = P::zero();
    }
}

impl<P: Numeric> Default for Unit<P> {
    fn default() -> Self {
        Unit::new(P::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Fixed;

    #[test]
    fn test_new_zeroes_grad() {
        let u = Unit::new(0.5f32);
        assert_eq!(u.value, 0.5);
        assert_eq!(u.grad, 0.0);
    }

    #[test]
    fn test_from_real_maps_into_policy() {
        let u: Unit<Fixed> = Unit::from_real(0.5);
        assert_eq!(u.value, Fixed(16));
        assert_eq!(u.grad, Fixed(0));
    }

    #[test]
    fn test_zero_grad() {
        let mut u = Unit::new(1.0f32);
        u.grad = 3.0;
        u.zero_grad();
        assert_eq!(u.grad, 0.0);
    }
}
