//! Parallel ratio evaluation across a universe of symbols using Rayon.
//!
//! Each symbol becomes one [`SymbolJob`]; jobs are independent pure
//! computations over two price windows, so they share nothing mutable.
//! A job never fails: it returns a [`JobOutcome`] that is either the
//! computed ratios or an absent marker with the reason. The fan-in keeps
//! only the computed results.
//!
//! # Thread Pool Sizing
//!
//! Every batch builds its own pool sized to the number of jobs, capped by
//! [`BatchConfig::max_threads`] (0 = available parallelism). Batches below
//! [`BatchConfig::min_parallel_jobs`] run on the calling thread.

mod config;
mod error;
mod executor;
mod progress;
mod result;
mod types;

pub use config::BatchConfig;
pub use error::BatchError;
pub use executor::BatchExecutor;
pub use progress::{Progress, ProgressTracker};
pub use result::BatchResult;
pub use types::{JobOutcome, SymbolJob};
