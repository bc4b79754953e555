//! Crossover operators for the genetic algorithm.
//!
//! Single-point crossover splits both parents at the same internal cut and
//! swaps their tails, producing two complementary children.

use crate::ga::genome::Genome;
use rand::Rng;

/// Single-point crossover at a random internal cut in `[1, len - 1]`.
///
/// # Panics
///
/// Panics if the parents differ in length or are shorter than two bits.
#[must_use]
pub fn single_point_crossover<R: Rng>(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut R,
) -> (Genome, Genome) {
    assert!(
        parent1.len() >= 2,
        "crossover needs at least two bits, got {}",
        parent1.len()
    );
    let cut = rng.gen_range(1..parent1.len());
    crossover_at(parent1, parent2, cut)
}

/// Swap the tails of two parents at `cut`.
///
/// `child1 = parent1[..cut] ++ parent2[cut..]` and
/// `child2 = parent2[..cut] ++ parent1[cut..]`. Applying it again to the
/// children at the same cut gives back the parents.
///
/// # Panics
///
/// Panics if the parents differ in length or `cut` exceeds their length.
#[must_use]
pub fn crossover_at(parent1: &Genome, parent2: &Genome, cut: usize) -> (Genome, Genome) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "crossover requires parents of equal length"
    );
    let (a, b) = (parent1.bits(), parent2.bits());

    let mut child1 = a[..cut].to_vec();
    child1.extend_from_slice(&b[cut..]);

    let mut child2 = b[..cut].to_vec();
    child2.extend_from_slice(&a[cut..]);

    (Genome::from_bits(child1), Genome::from_bits(child2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_crossover_at_swaps_tails() {
        let a: Genome = "11111111".parse().unwrap();
        let b: Genome = "00000000".parse().unwrap();

        let (c1, c2) = crossover_at(&a, &b, 3);

        assert_eq!(c1.to_string(), "11100000");
        assert_eq!(c2.to_string(), "00011111");
    }

    #[test]
    fn test_crossover_at_same_cut_restores_parents() {
        let a: Genome = "10110010".parse().unwrap();
        let b: Genome = "01101100".parse().unwrap();

        let (c1, c2) = crossover_at(&a, &b, 5);
        let (r1, r2) = crossover_at(&c1, &c2, 5);

        assert_eq!(r1, a);
        assert_eq!(r2, b);
    }

    #[test]
    fn test_cut_is_always_internal() {
        let mut rng = SmallRng::seed_from_u64(123);
        let a: Genome = "1111".parse().unwrap();
        let b: Genome = "0000".parse().unwrap();

        for _ in 0..500 {
            let (c1, c2) = single_point_crossover(&a, &b, &mut rng);
            // An internal cut mixes both parents into each child
            assert_ne!(c1, a);
            assert_ne!(c1, b);
            assert_ne!(c2, a);
            assert_ne!(c2, b);
            assert!(c1.bits()[0] && !c1.bits()[3]);
        }
    }

    #[test]
    fn test_two_bit_genomes_cut_in_middle() {
        let mut rng = SmallRng::seed_from_u64(5);
        let a: Genome = "11".parse().unwrap();
        let b: Genome = "00".parse().unwrap();

        let (c1, c2) = single_point_crossover(&a, &b, &mut rng);

        assert_eq!(c1.to_string(), "10");
        assert_eq!(c2.to_string(), "01");
    }
}
