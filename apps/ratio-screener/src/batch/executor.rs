//! Batch executor using a bounded Rayon thread pool.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{Level, debug, info, span};

use super::config::BatchConfig;
use super::error::BatchError;
use super::progress::ProgressTracker;
use super::result::BatchResult;
use super::types::{JobOutcome, SymbolJob};

/// Runs one evaluation task per symbol and waits for all of them.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    config: BatchConfig,
}

impl BatchExecutor {
    /// Create a new batch executor.
    #[must_use]
    pub const fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Worker count for a batch of `jobs` symbols.
    #[must_use]
    pub fn effective_thread_count(&self, jobs: usize) -> usize {
        let cap = if self.config.max_threads > 0 {
            self.config.max_threads
        } else {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        };
        jobs.min(cap).max(1)
    }

    /// Evaluate every job with `task`.
    ///
    /// There is no cancellation: the call returns once every job has
    /// produced an outcome.
    ///
    /// # Errors
    ///
    /// Returns error if no jobs are provided or the pool cannot be built.
    pub fn run<F>(&self, jobs: &[SymbolJob], task: F) -> Result<BatchResult, BatchError>
    where
        F: Fn(&SymbolJob) -> JobOutcome + Send + Sync,
    {
        if jobs.is_empty() {
            return Err(BatchError::NoJobs);
        }

        let tracker = ProgressTracker::new(jobs.len() as u64);
        let start_time = Instant::now();
        let threads = self.effective_thread_count(jobs.len());

        info!(jobs = jobs.len(), threads, "Starting ratio batch");

        let outcomes = if jobs.len() >= self.config.min_parallel_jobs {
            self.run_parallel(jobs, threads, &tracker, &task)?
        } else {
            Self::run_sequential(jobs, &tracker, &task)
        };

        let elapsed = start_time.elapsed();
        let final_progress = tracker.progress();

        info!(
            computed = final_progress.computed(),
            absent = final_progress.absent,
            total = final_progress.total,
            elapsed_ms = elapsed.as_millis() as u64,
            "Ratio batch complete"
        );

        Ok(BatchResult {
            outcomes,
            total_time_ms: elapsed.as_millis() as u64,
            jobs_executed: jobs.len() as u64,
            jobs_computed: final_progress.computed(),
            jobs_absent: final_progress.absent,
        })
    }

    fn run_parallel<F>(
        &self,
        jobs: &[SymbolJob],
        threads: usize,
        tracker: &ProgressTracker,
        task: &F,
    ) -> Result<Vec<JobOutcome>, BatchError>
    where
        F: Fn(&SymbolJob) -> JobOutcome + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ratio-worker-{i}"))
            .build()
            .map_err(|e| BatchError::ThreadPoolError {
                message: e.to_string(),
            })?;

        let track_progress = self.config.track_progress;

        Ok(pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    let outcome = Self::execute_job(job, task);
                    tracker.job_completed(outcome.is_computed());

                    if track_progress {
                        let progress = tracker.progress();
                        debug!(
                            "Progress: {:.1}% ({}/{})",
                            progress.percentage(),
                            progress.completed,
                            progress.total,
                        );
                    }

                    outcome
                })
                .collect()
        }))
    }

    fn run_sequential<F>(jobs: &[SymbolJob], tracker: &ProgressTracker, task: &F) -> Vec<JobOutcome>
    where
        F: Fn(&SymbolJob) -> JobOutcome,
    {
        jobs.iter()
            .map(|job| {
                let outcome = Self::execute_job(job, task);
                tracker.job_completed(outcome.is_computed());
                outcome
            })
            .collect()
    }

    fn execute_job<F>(job: &SymbolJob, task: &F) -> JobOutcome
    where
        F: Fn(&SymbolJob) -> JobOutcome,
    {
        let span = span!(Level::DEBUG, "ratio_job", symbol = %job.symbol);
        let _guard = span.enter();

        let outcome = task(job);
        if let JobOutcome::Absent { reason, .. } = &outcome {
            debug!(%reason, "Symbol excluded");
        }
        outcome
    }
}
