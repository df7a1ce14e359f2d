//! Configuration for batch execution.

use serde::{Deserialize, Serialize};

/// Configuration for batch execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of worker threads (0 = available parallelism).
    pub max_threads: usize,

    /// Whether to log per-job progress at debug level.
    pub track_progress: bool,

    /// Minimum parallelization threshold (jobs below this run sequentially).
    pub min_parallel_jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            track_progress: true,
            min_parallel_jobs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();

        assert_eq!(config.max_threads, 0);
        assert!(config.track_progress);
        assert_eq!(config.min_parallel_jobs, 2);
    }
}
