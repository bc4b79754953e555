//! Genetic algorithm for recovering a hidden bit passcode.
//!
//! Candidates are fixed-length bit strings scored by how many bits they share
//! with the target. Each generation is evaluated, recorded, and replaced by
//! offspring of tournament-selected parents, with the best individual carried
//! over unchanged.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Evolution Loop  → Recorder      │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │     Genome + Matching-bit Fitness   │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every stochastic operation takes the random source as a parameter, so a
//! run is fully determined by its inputs and seed.
//!
//! # Example
//!
//! ```
//! use passcode_ga::ga::{run, GaConfig, Genome};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let target = Genome::random(&mut rng, 16);
//! let config = GaConfig { population_size: 40, max_generations: 300, ..GaConfig::default() };
//!
//! let result = run(&target, &config, "doc", &mut rng)?;
//! assert!(result.best_fitness() <= 16);
//! # Ok::<(), passcode_ga::error::ConfigError>(())
//! ```

mod crossover;
mod evolution;
mod genome;
mod metrics;
mod mutation;
mod selection;

pub use crossover::{crossover_at, single_point_crossover};
pub use evolution::{run, run_from_population, run_with_recorder, GaConfig, RunResult};
pub use genome::{Genome, ParseGenomeError, DEFAULT_GENOME_LENGTH};
pub use metrics::{GenerationRecord, HistoryRecorder, LoggingRecorder, MetricsRecorder};
pub use mutation::mutate;
pub use selection::{first_best_index, tournament_select, FitnessStats};
