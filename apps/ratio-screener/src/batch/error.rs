//! Error types for batch execution.

use thiserror::Error;

/// Errors from batch execution.
///
/// Per-symbol problems are never errors; they surface as
/// [`super::JobOutcome::Absent`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Thread pool initialization failed.
    #[error("Failed to initialize thread pool: {message}")]
    ThreadPoolError {
        /// Error message.
        message: String,
    },

    /// No jobs to execute.
    #[error("No symbols to evaluate")]
    NoJobs,
}
