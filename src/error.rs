//! Error types for configuring and reporting evolution runs.

use thiserror::Error;

/// Invalid run configuration, detected before any generation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Fewer than two individuals cannot form a breeding population.
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    /// A probability parameter outside `[0, 1]` (or NaN).
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Tournaments need at least one contestant.
    #[error("tournament size must be at least 1")]
    TournamentTooSmall,
    /// Single-point crossover needs an internal cut point.
    #[error("genome length must be at least 2, got {0}")]
    GenomeTooShort(usize),
    /// A genome does not have the target's length.
    #[error("genome length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch {
        /// Length of the target.
        expected: usize,
        /// Length of the offending genome.
        actual: usize,
    },
    /// A seeded initial population does not match the configured size.
    #[error("initial population has {actual} individuals, expected {expected}")]
    PopulationSizeMismatch {
        /// Configured population size.
        expected: usize,
        /// Number of individuals supplied.
        actual: usize,
    },
    /// A sweep lists the same mutation rate more than once.
    #[error("mutation rate {0} is listed more than once")]
    DuplicateRate(f64),
}

/// Failure while persisting run output.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
