//! Error types for price series parsing.

use thiserror::Error;

/// Errors raised while reading or windowing a price series.
///
/// Callers that follow the soft-failure policy collapse every variant into
/// "absent" via [`super::load_window`]; the detail only reaches the debug log.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The source could not be opened or read.
    #[error("Failed to read price series: {0}")]
    Io(#[from] std::io::Error),

    /// A row did not contain both a date and a price token.
    #[error("Malformed row {line}: expected '<date> <price>'")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
    },

    /// The date token is not `YYYY-MM-DD`.
    #[error("Invalid date '{token}' on line {line}")]
    InvalidDate {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The price token is not a decimal number.
    #[error("Invalid price '{token}' on line {line}")]
    InvalidPrice {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The series holds fewer rows than the requested window.
    #[error("Window of {required} days requested but only {available} rows available")]
    InsufficientRows {
        /// Requested window length.
        required: usize,
        /// Rows present in the source.
        available: usize,
    },

    /// The requested window cannot produce a single return.
    #[error("Window length must be at least 2, got {0}")]
    WindowTooShort(usize),
}
