//! Market data client and run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::FetchError;

/// Default market data API base URL.
pub const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "APCA_API_KEY_ID";

/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "APCA_API_SECRET_KEY";

/// Environment variable overriding the data API base URL.
pub const DATA_URL_ENV: &str = "APCA_API_DATA_URL";

/// Configuration for the Alpaca market data client.
#[derive(Debug, Clone)]
pub struct AlpacaConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Market data API base URL, without trailing slash.
    pub data_base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl AlpacaConfig {
    /// Create a new configuration against the default data URL.
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            data_base_url: DEFAULT_DATA_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Read credentials and base URL from the environment.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingEnv` if a credential is unset or empty.
    pub fn from_env() -> Result<Self, FetchError> {
        let api_key = required_env(API_KEY_ENV)?;
        let api_secret = required_env(API_SECRET_ENV)?;

        let config = Self::new(api_key, api_secret);
        Ok(match std::env::var(DATA_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(&url),
            _ => config,
        })
    }

    /// Set the data API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.data_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

fn required_env(name: &'static str) -> Result<String, FetchError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(FetchError::MissingEnv(name)),
    }
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

/// Settings for one fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Trading days to keep per symbol.
    pub ndays: usize,
    /// Directory receiving `<SYMBOL>.dat` files.
    pub data_dir: PathBuf,
    /// Symbols fetched concurrently.
    pub max_workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            ndays: 504,
            data_dir: PathBuf::from("./data"),
            max_workers: 100,
        }
    }
}

impl FetchOptions {
    /// Calendar days of history requested to cover `ndays` trading days.
    #[must_use]
    pub const fn lookback_days(&self) -> u64 {
        (self.ndays as u64 * 7).div_ceil(4)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn config_creation() {
        let config = AlpacaConfig::new("key".to_string(), "secret".to_string());
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.data_base_url, DEFAULT_DATA_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = AlpacaConfig::new("key".to_string(), "secret".to_string())
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.data_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn config_with_retry() {
        let retry = RetryConfig {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            multiplier: 3.0,
        };
        let config =
            AlpacaConfig::new("key".to_string(), "secret".to_string()).with_retry(retry);
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.multiplier, 3.0);
    }

    #[test]
    fn options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.ndays, 504);
        assert_eq!(options.data_dir, PathBuf::from("./data"));
        assert_eq!(options.max_workers, 100);
    }

    #[test]
    fn lookback_rounds_up() {
        let mut options = FetchOptions::default();
        assert_eq!(options.lookback_days(), 882);

        options.ndays = 5;
        assert_eq!(options.lookback_days(), 9);
    }
}
