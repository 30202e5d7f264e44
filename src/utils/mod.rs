/*!
# Utilities

- [`GraphCopy`] reconstructs an equivalent in-memory graph from any [`GraphView`], choosing the
  weighted representation whenever the source carries weights (see [`AnyDenseGraph`]),
- [`Probability`] validates probabilities for the generators in [`crate::gens`].
*/

use num::{One, Zero};

use crate::prelude::*;

mod copy;

pub use copy::*;

/// Helper trait for probabilities
pub trait Probability {
    /// Returns *true* if the probability is valid (ie. between `0` and `1`)
    fn is_valid_probability(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probability(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities() {
        assert!(0.0f64.is_valid_probability());
        assert!(0.5f32.is_valid_probability());
        assert!(1.0f64.is_valid_probability());
        assert!(!(-0.1f64).is_valid_probability());
        assert!(!1.5f64.is_valid_probability());
        assert!(!f64::NAN.is_valid_probability());
    }
}
