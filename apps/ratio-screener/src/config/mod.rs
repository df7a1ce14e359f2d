//! Configuration for the ratio screener.
//!
//! Settings come from three layers: built-in defaults, an optional YAML
//! file, and command-line flags (highest precedence). The YAML file
//! supports environment variable interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ratio_screener::config::{ScreenerConfig, load_config};
//!
//! // Load from a custom path
//! let config = load_config(Some("screener.yaml"))?;
//!
//! // Or fall back to defaults
//! let config = ScreenerConfig::default();
//! println!("window: {} days", config.num_days);
//! ```

mod observability;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::batch::BatchConfig;
use crate::ratios::RatioColumn;

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};

/// Default config file name.
pub const DEFAULT_CONFIG_PATH: &str = "screener.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Reference symbol every candidate is measured against.
    #[serde(default = "default_reference")]
    pub reference: String,
    /// Trailing window length in trading days.
    #[serde(default = "default_num_days")]
    pub num_days: usize,
    /// Directory holding `<SYMBOL>.dat` price files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// 0-based report column to sort by.
    #[serde(default = "default_sort_column")]
    pub sort_column: usize,
    /// Parallel batch settings.
    #[serde(default)]
    pub parallel: BatchConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            num_days: default_num_days(),
            data_dir: default_data_dir(),
            sort_column: default_sort_column(),
            parallel: BatchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ScreenerConfig {
    /// The configured sort column.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the index is past the last column.
    pub fn sort_column(&self) -> Result<RatioColumn, ConfigError> {
        RatioColumn::from_index(self.sort_column).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "sort_column must be between 0 and {}, got {}",
                RatioColumn::ALL.len() - 1,
                self.sort_column
            ))
        })
    }

    /// Check every value; used after each configuration layer is applied.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "reference must not be empty".to_string(),
            ));
        }

        if self.num_days < 2 {
            return Err(ConfigError::ValidationError(format!(
                "num_days must be at least 2, got {}",
                self.num_days
            )));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir must not be empty".to_string(),
            ));
        }

        self.sort_column()?;
        Ok(())
    }
}

fn default_reference() -> String {
    "SPY".to_string()
}

const fn default_num_days() -> usize {
    504
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

const fn default_sort_column() -> usize {
    RatioColumn::WeightedAverage.index()
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "screener.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<ScreenerConfig, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<ScreenerConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: ScreenerConfig = serde_yaml_bw::from_str(&interpolated)?;
    config.validate()?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}
