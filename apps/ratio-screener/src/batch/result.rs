//! Result types for batch execution.

use crate::ratios::RatioResult;

use super::types::JobOutcome;

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    /// Per-symbol outcomes in completion-independent order.
    pub outcomes: Vec<JobOutcome>,

    /// Total execution time in milliseconds.
    pub total_time_ms: u64,

    /// Number of jobs executed.
    pub jobs_executed: u64,

    /// Number of jobs that produced ratios.
    pub jobs_computed: u64,

    /// Number of jobs that produced no ratios.
    pub jobs_absent: u64,
}

impl BatchResult {
    /// An empty batch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            outcomes: Vec::new(),
            total_time_ms: 0,
            jobs_executed: 0,
            jobs_computed: 0,
            jobs_absent: 0,
        }
    }

    /// Fraction of jobs that produced ratios.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.jobs_executed == 0 {
            0.0
        } else {
            self.jobs_computed as f64 / self.jobs_executed as f64
        }
    }

    /// Symbols that produced no ratios.
    #[must_use]
    pub fn absent_symbols(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_computed())
            .map(JobOutcome::symbol)
            .collect()
    }

    /// Keep only the computed ratios, preserving outcome order.
    #[must_use]
    pub fn into_results(self) -> Vec<RatioResult> {
        self.outcomes
            .into_iter()
            .filter_map(JobOutcome::into_result)
            .collect()
    }
}
