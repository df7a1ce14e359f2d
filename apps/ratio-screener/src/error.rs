//! Top-level screener errors.
//!
//! Only failures that end an invocation live here. A symbol that cannot be
//! evaluated inside a batch is not an error: it comes back as
//! [`JobOutcome::Absent`](crate::batch::JobOutcome) and is dropped.

use thiserror::Error;

use crate::batch::BatchError;
use crate::config::ConfigError;
use crate::ratios::AbsentReason;

/// Errors that stop a screener run.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not run the batch.
    #[error("Batch execution failed: {0}")]
    Batch(#[from] BatchError),

    /// The symbol list file could not be read.
    #[error("Failed to read symbol list '{path}': {source}")]
    ListRead {
        /// Path to the list file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The only requested symbol produced no ratios.
    #[error("No result for {symbol}: {reason}")]
    NoResult {
        /// Requested symbol.
        symbol: String,
        /// Why no ratios were produced.
        reason: AbsentReason,
    },

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
