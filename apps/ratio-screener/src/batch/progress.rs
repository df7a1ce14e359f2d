//! Progress tracking for batch execution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Lock-free progress counters shared by the workers of one batch.
#[derive(Debug)]
pub struct ProgressTracker {
    total_jobs: u64,
    completed_jobs: AtomicU64,
    absent_jobs: AtomicU64,
    start_time: Instant,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new(total_jobs: u64) -> Self {
        Self {
            total_jobs,
            completed_jobs: AtomicU64::new(0),
            absent_jobs: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a finished job.
    pub fn job_completed(&self, computed: bool) {
        self.completed_jobs.fetch_add(1, Ordering::Relaxed);
        if !computed {
            self.absent_jobs.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let completed = self.completed_jobs.load(Ordering::Relaxed);
        let absent = self.absent_jobs.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        let jobs_per_sec = if elapsed.as_secs_f64() > 0.0 {
            completed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Progress {
            total: self.total_jobs,
            completed,
            absent,
            elapsed_ms: elapsed.as_millis() as u64,
            jobs_per_sec,
        }
    }
}

/// Progress snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Total number of jobs.
    pub total: u64,
    /// Finished jobs.
    pub completed: u64,
    /// Finished jobs that produced no ratios.
    pub absent: u64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Jobs processed per second.
    pub jobs_per_sec: f64,
}

impl Progress {
    /// Get completion percentage.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }

    /// Finished jobs that produced ratios.
    #[must_use]
    pub const fn computed(&self) -> u64 {
        self.completed - self.absent
    }
}
