//! Main evolution loop.
//!
//! One run walks a fixed state machine: initialize a random population,
//! then per generation evaluate, record, test for success or exhaustion,
//! and otherwise breed the next population with elitism, tournament
//! selection, single-point crossover and bit-flip mutation.

use crate::error::{ConfigError, ConfigResult};
use crate::ga::crossover::single_point_crossover;
use crate::ga::genome::Genome;
use crate::ga::metrics::{GenerationRecord, HistoryRecorder, MetricsRecorder};
use crate::ga::mutation::mutate;
use crate::ga::selection::{first_best_index, tournament_select, FitnessStats};
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use std::time::{Duration, Instant};

/// Parameters of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Per-bit flip probability.
    pub mutation_rate: f64,
    /// Contestants per tournament.
    pub tournament_size: usize,
    /// Last generation index evaluated before giving up.
    pub max_generations: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            crossover_rate: 0.80,
            mutation_rate: 0.01,
            tournament_size: 3,
            max_generations: 5000,
        }
    }
}

impl GaConfig {
    /// Check every parameter range.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.tournament_size < 1 {
            return Err(ConfigError::TournamentTooSmall);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

/// Outcome of one run.
///
/// Serializes with `elapsed` as `time_sec` (fractional seconds) and the best
/// individual as its bit string.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    run_id: String,
    found: bool,
    generations_used: usize,
    #[serde(rename = "time_sec", serialize_with = "serialize_secs")]
    elapsed: Duration,
    #[serde(serialize_with = "serialize_bit_string")]
    best_individual: Genome,
    best_fitness: usize,
    history: Vec<GenerationRecord>,
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

fn serialize_bit_string<S: Serializer>(genome: &Genome, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(genome)
}

impl RunResult {
    /// Whether the target was matched exactly.
    #[must_use]
    pub fn found(&self) -> bool {
        self.found
    }

    /// Index of the generation the run stopped at.
    #[must_use]
    pub fn generations_used(&self) -> usize {
        self.generations_used
    }

    /// Wall-clock time from initialization to termination.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// First individual holding the best fitness of the final generation.
    #[must_use]
    pub fn best_individual(&self) -> &Genome {
        &self.best_individual
    }

    /// Fitness of [`Self::best_individual`].
    #[must_use]
    pub fn best_fitness(&self) -> usize {
        self.best_fitness
    }

    /// One record per evaluated generation, in order.
    #[must_use]
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Caller-supplied run identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

/// Evolve a random population toward `target`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration or target is invalid.
/// Failing to converge is not an error; see [`RunResult::found`].
pub fn run<R: Rng>(
    target: &Genome,
    config: &GaConfig,
    run_id: &str,
    rng: &mut R,
) -> ConfigResult<RunResult> {
    run_with_recorder(target, config, run_id, rng, &mut HistoryRecorder::new())
}

/// Like [`run`], streaming generation records into `recorder`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration or target is invalid.
pub fn run_with_recorder<R: Rng, M: MetricsRecorder>(
    target: &Genome,
    config: &GaConfig,
    run_id: &str,
    rng: &mut R,
    recorder: &mut M,
) -> ConfigResult<RunResult> {
    validate_run(target, config)?;

    let start = Instant::now();
    let population: Vec<Genome> = (0..config.population_size)
        .map(|_| Genome::random(rng, target.len()))
        .collect();

    Ok(evolve(target, config, run_id, population, rng, recorder, start))
}

/// Run from a caller-supplied generation-0 population.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration or target is invalid, the
/// population size differs from `config.population_size`, or any genome
/// differs in length from `target`.
pub fn run_from_population<R: Rng, M: MetricsRecorder>(
    target: &Genome,
    config: &GaConfig,
    run_id: &str,
    population: Vec<Genome>,
    rng: &mut R,
    recorder: &mut M,
) -> ConfigResult<RunResult> {
    validate_run(target, config)?;
    if population.len() != config.population_size {
        return Err(ConfigError::PopulationSizeMismatch {
            expected: config.population_size,
            actual: population.len(),
        });
    }
    if let Some(bad) = population.iter().find(|g| g.len() != target.len()) {
        return Err(ConfigError::LengthMismatch {
            expected: target.len(),
            actual: bad.len(),
        });
    }

    let start = Instant::now();
    Ok(evolve(target, config, run_id, population, rng, recorder, start))
}

fn validate_run(target: &Genome, config: &GaConfig) -> ConfigResult<()> {
    config.validate()?;
    if target.len() < 2 {
        return Err(ConfigError::GenomeTooShort(target.len()));
    }
    Ok(())
}

/// Generation loop. Inputs are already validated.
fn evolve<R: Rng, M: MetricsRecorder>(
    target: &Genome,
    config: &GaConfig,
    run_id: &str,
    mut population: Vec<Genome>,
    rng: &mut R,
    recorder: &mut M,
    start: Instant,
) -> RunResult {
    let genome_len = target.len();
    log::info!(
        "[{run_id}] starting: {genome_len} bits, population {}, crossover {}, mutation {}, tournament {}, max generations {}",
        config.population_size,
        config.crossover_rate,
        config.mutation_rate,
        config.tournament_size,
        config.max_generations
    );

    let mut generation = 0usize;
    loop {
        let fitness: Vec<usize> = population.iter().map(|g| g.fitness(target)).collect();
        let stats = FitnessStats::from_fitness(&fitness);
        recorder.record(GenerationRecord {
            generation,
            best_fitness: stats.best,
            average_fitness: stats.mean,
        });

        // First occurrence of the maximum, both for elitism and reporting
        let best_idx = first_best_index(&fitness).unwrap_or_default();
        let found = stats.best == genome_len;

        if found || generation == config.max_generations {
            let elapsed = start.elapsed();
            log::info!(
                "[{run_id}] {} at generation {generation}: best {}/{genome_len} in {:.3}s",
                if found { "found" } else { "exhausted" },
                stats.best,
                elapsed.as_secs_f64()
            );
            return RunResult {
                found,
                generations_used: generation,
                elapsed,
                best_individual: population.swap_remove(best_idx),
                best_fitness: stats.best,
                history: recorder.finalize(),
                run_id: run_id.to_string(),
            };
        }

        population = next_generation(&population, &fitness, best_idx, config, rng);
        generation += 1;
    }
}

/// Breed the next population: the elite first, then mutated offspring of
/// tournament-selected parents until the population is full.
///
/// With an odd number of free slots the last pair's second child is dropped.
fn next_generation<R: Rng>(
    population: &[Genome],
    fitness: &[usize],
    elite_idx: usize,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<Genome> {
    let size = config.population_size;
    let mut next = Vec::with_capacity(size);
    next.push(population[elite_idx].clone());

    while next.len() < size {
        let parent1 = tournament_select(population, fitness, config.tournament_size, rng);
        let parent2 = tournament_select(population, fitness, config.tournament_size, rng);

        let (mut child1, mut child2) = if rng.gen_bool(config.crossover_rate) {
            single_point_crossover(&parent1, &parent2, rng)
        } else {
            (parent1, parent2)
        };

        mutate(&mut child1, config.mutation_rate, rng);
        mutate(&mut child2, config.mutation_rate, rng);

        next.push(child1);
        if next.len() < size {
            next.push(child2);
        }
    }

    next
}
