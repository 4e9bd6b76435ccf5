//! Multiple master blending.

use crate::error::{Result, SyntaxError};
use crate::util::{Fixed, mul_fix};

/// The design weights of a multiple master font instance.
///
/// The weights should sum up to one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Blend {
    weights: Vec<Fixed>,
}

impl Blend {
    /// Creates a blend from one weight per master design.
    pub fn new(weights: Vec<Fixed>) -> Self {
        Self { weights }
    }

    /// Returns the number of master designs.
    pub fn num_designs(&self) -> usize {
        self.weights.len()
    }

    /// Returns the design weights.
    pub fn weights(&self) -> &[Fixed] {
        &self.weights
    }

    /// Blends `num_points` values in place.
    ///
    /// `args` holds the base values of all points followed by the deltas of
    /// the remaining designs, `num_designs - 1` per point. The blended values
    /// are written to the front of `args`.
    pub(crate) fn apply(&self, args: &mut [i32], num_points: usize) -> Result<()> {
        let num_designs = self.weights.len();

        if num_designs == 0 || args.len() != num_points * num_designs {
            return Err(SyntaxError::InvalidBlendArguments.into());
        }

        let (values, deltas) = args.split_at_mut(num_points);
        let mut deltas = deltas.iter();

        for value in values {
            let mut blended = *value;

            for &weight in &self.weights[1..] {
                let delta = deltas.next().copied().unwrap_or_default();
                blended = blended.wrapping_add(mul_fix(delta, weight));
            }

            *value = blended;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_designs() {
        let blend = Blend::new(vec![Fixed::from_f32(0.75), Fixed::from_f32(0.25)]);
        // Base values 100 and 10, deltas 40 and -8.
        let mut args = [100, 10, 40, -8];
        blend.apply(&mut args, 2).unwrap();

        assert_eq!(&args[..2], &[110, 8]);
        assert_eq!(blend.num_designs(), 2);
        assert_eq!(blend.weights(), &[Fixed::from_bits(0xC000), Fixed::from_bits(0x4000)]);
    }

    #[test]
    fn three_designs() {
        let blend = Blend::new(vec![
            Fixed::from_f32(0.5),
            Fixed::from_f32(0.25),
            Fixed::from_f32(0.25),
        ]);
        let mut args = [0, 100, 200];
        blend.apply(&mut args, 1).unwrap();

        assert_eq!(args[0], 75);
    }

    #[test]
    fn wrong_argument_count() {
        let blend = Blend::new(vec![Fixed::ONE, Fixed::ZERO]);
        let mut args = [1, 2, 3];

        assert_eq!(
            blend.apply(&mut args, 2),
            Err(SyntaxError::InvalidBlendArguments.into())
        );
    }
}
