//! Bit-flip mutation.
//!
//! Every position flips independently with the same probability.

use crate::ga::genome::Genome;
use rand::Rng;

/// Flip each bit of `genome` in place with probability `rate`.
///
/// The caller must own `genome` exclusively; the engine only mutates fresh
/// children, never members of the current population.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R: Rng>(genome: &mut Genome, rate: f64, rng: &mut R) {
    for bit in genome.bits_mut() {
        if rng.gen_bool(rate) {
            *bit = !*bit;
        }
    }
}
