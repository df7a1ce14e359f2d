//! Price fetcher error types.

use thiserror::Error;

/// Errors from the Alpaca market data client.
#[derive(Debug, Error, Clone)]
pub enum AlpacaError {
    /// HTTP request could not be built or sent.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned an error.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from the API.
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Authentication failed or credentials are missing.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error (retryable).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// Unknown symbol or endpoint.
    #[error("Not found: {path}")]
    NotFound {
        /// Request path that was not found.
        path: String,
    },
}

impl AlpacaError {
    /// Check if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::RateLimited { .. } | Self::MaxRetriesExceeded { .. }
        )
    }
}

/// Errors from fetching and storing one symbol or a whole universe.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The market data API failed.
    #[error(transparent)]
    Alpaca(#[from] AlpacaError),

    /// The provider returned no usable bars.
    #[error("No daily bars for {symbol}")]
    NoBars {
        /// Requested symbol.
        symbol: String,
    },

    /// A required environment variable is missing.
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    /// The universe list could not be read.
    #[error("Failed to read symbol list '{path}': {source}")]
    ListRead {
        /// Path to the list file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A price file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        /// Path of the price file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },
}
