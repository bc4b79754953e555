//! Per-generation metrics sinks.
//!
//! The engine appends one [`GenerationRecord`] per evaluated generation and
//! calls [`MetricsRecorder::finalize`] once when the run ends. It never reads
//! recorded data back in between.

use serde::{Deserialize, Serialize};

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// Highest fitness in the population.
    pub best_fitness: usize,
    /// Mean fitness of the population.
    pub average_fitness: f64,
}

/// Append-only sink for generation records.
pub trait MetricsRecorder {
    /// Append a record. Records arrive in strictly increasing generation order.
    fn record(&mut self, record: GenerationRecord);

    /// Return the full ordered history once the run is over.
    fn finalize(&mut self) -> Vec<GenerationRecord>;
}

/// In-memory recorder keeping every record.
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    records: Vec<GenerationRecord>,
}

impl HistoryRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsRecorder for HistoryRecorder {
    fn record(&mut self, record: GenerationRecord) {
        debug_assert!(
            self.records
                .last()
                .is_none_or(|last| last.generation < record.generation),
            "generation records must arrive in increasing order"
        );
        self.records.push(record);
    }

    fn finalize(&mut self) -> Vec<GenerationRecord> {
        std::mem::take(&mut self.records)
    }
}

/// Recorder that logs each record at `debug` level before forwarding it.
#[derive(Debug, Clone, Default)]
pub struct LoggingRecorder<R> {
    run_id: String,
    inner: R,
}

impl<R: MetricsRecorder> LoggingRecorder<R> {
    /// Wrap `inner`, tagging log lines with `run_id`.
    pub fn new(run_id: impl Into<String>, inner: R) -> Self {
        Self {
            run_id: run_id.into(),
            inner,
        }
    }
}

impl<R: MetricsRecorder> MetricsRecorder for LoggingRecorder<R> {
    fn record(&mut self, record: GenerationRecord) {
        log::debug!(
            "[{}] gen {:>5}: best={} avg={:.4}",
            self.run_id,
            record.generation,
            record.best_fitness,
            record.average_fitness
        );
        self.inner.record(record);
    }

    fn finalize(&mut self) -> Vec<GenerationRecord> {
        self.inner.finalize()
    }
}
