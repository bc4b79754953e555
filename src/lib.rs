// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Passcode GA: a seedable genetic algorithm that recovers a hidden bit string.
//!
//! This crate provides:
//! - A generational GA over fixed-length bit strings with elitism
//! - Tournament selection, single-point crossover and bit-flip mutation
//! - Per-generation metrics recording
//! - CSV/JSON reporting and a parallel mutation-rate tuning sweep
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Tuning Sweep (rayon) → Reports    │
//! ├─────────────────────────────────────┤
//! │         Evolution Engine            │
//! ├─────────────────────────────────────┤
//! │   Genome │ Operators │ Recorder     │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod experiment;
pub mod ga;
pub mod report;

pub use error::{ConfigError, ConfigResult, ReportError};

// Re-export the engine entry points at crate root for convenience
pub use ga::{run, GaConfig, Genome, GenerationRecord, RunResult};
