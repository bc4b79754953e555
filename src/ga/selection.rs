//! Selection operators for the genetic algorithm.
//!
//! Parents are chosen by tournament selection; the single best individual
//! is carried over unchanged by the engine (elitism).

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use crate::ga::genome::Genome;
use rand::Rng;

/// Tournament selection: draw `k` contestants with replacement and return a
/// copy of the fittest.
///
/// Ties keep the earliest draw, so repeated runs with the same RNG state
/// always pick the same contestant.
///
/// # Panics
///
/// Panics if the population is empty, if `k` is zero, or if `fitness` is not
/// parallel to `population`.
#[must_use]
pub fn tournament_select<R: Rng>(
    population: &[Genome],
    fitness: &[usize],
    k: usize,
    rng: &mut R,
) -> Genome {
    assert_eq!(
        population.len(),
        fitness.len(),
        "fitness must be parallel to the population"
    );
    population[tournament_index(fitness, k, rng)].clone()
}

/// Index of the tournament winner among `fitness`.
pub(crate) fn tournament_index<R: Rng>(fitness: &[usize], k: usize, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "tournament over an empty population");
    assert!(k >= 1, "tournament size must be at least 1");

    let pop_size = fitness.len();
    let mut best_idx = rng.gen_range(0..pop_size);
    let mut best_fitness = fitness[best_idx];

    for _ in 1..k {
        let idx = rng.gen_range(0..pop_size);
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Index of the first individual holding the maximum fitness.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn first_best_index(fitness: &[usize]) -> Option<usize> {
    let max = fitness.iter().copied().max()?;
    fitness.iter().position(|&f| f == max)
}

/// Summary statistics over one generation's fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    /// Best fitness in the population.
    pub best: usize,
    /// Worst fitness in the population.
    pub worst: usize,
    /// Mean fitness of the population.
    pub mean: f64,
}

impl FitnessStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[usize]) -> Self {
        if fitness.is_empty() {
            return Self {
                best: 0,
                worst: 0,
                mean: 0.0,
            };
        }

        let sum: usize = fitness.iter().sum();
        Self {
            best: fitness.iter().copied().max().unwrap_or(0),
            worst: fitness.iter().copied().min().unwrap_or(0),
            mean: sum as f64 / fitness.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn population() -> (Vec<Genome>, Vec<usize>) {
        let target: Genome = "1111".parse().unwrap();
        let pop: Vec<Genome> = ["0000", "1100", "1111", "1000", "1110"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let fitness = pop.iter().map(|g| g.fitness(&target)).collect();
        (pop, fitness)
    }

    #[test]
    fn test_tournament_selection_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (_, fitness) = population();

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            let idx = tournament_index(&fitness, 3, &mut rng);
            counts[idx] += 1;
        }

        // Index 2 holds the perfect match
        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_tournament_of_one_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(9);
        let fitness = vec![0, 0, 100, 0];

        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[tournament_index(&fitness, 1, &mut rng)] += 1;
        }

        // No selection pressure: every slot is hit about a quarter of the time
        for count in counts {
            assert!((800..1200).contains(&count), "counts = {counts:?}");
        }
    }

    #[test]
    fn test_tournament_returns_a_copy() {
        let mut rng = SmallRng::seed_from_u64(1);
        let (pop, fitness) = population();

        let mut chosen = tournament_select(&pop, &fitness, 2, &mut rng);
        let before = pop.clone();
        chosen.bits_mut()[0] = !chosen.bits()[0];

        assert_eq!(pop, before);
    }

    #[test]
    fn test_tie_keeps_first_draw() {
        // All contestants tie, so the winner is always the first draw.
        let fitness = vec![3; 6];
        for seed in 0..20 {
            let mut draw_rng = SmallRng::seed_from_u64(seed);
            let first = draw_rng.gen_range(0..fitness.len());

            let mut rng = SmallRng::seed_from_u64(seed);
            assert_eq!(tournament_index(&fitness, 4, &mut rng), first);
        }
    }

    #[test]
    fn test_first_best_index() {
        assert_eq!(first_best_index(&[1, 4, 2, 4]), Some(1));
        assert_eq!(first_best_index(&[5]), Some(0));
        assert_eq!(first_best_index(&[]), None);
    }

    #[test]
    fn test_fitness_stats() {
        let stats = FitnessStats::from_fitness(&[1, 2, 3, 4, 5]);

        assert!((stats.mean - 3.0).abs() < 1e-9);
        assert_eq!(stats.best, 5);
        assert_eq!(stats.worst, 1);
    }
}
