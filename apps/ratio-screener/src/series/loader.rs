//! Price file parsing and trailing-window extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::error::SeriesError;

/// Date format used by price files.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of per-symbol price files.
pub const SERIES_EXTENSION: &str = "dat";

/// A single daily observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub price: f64,
}

/// An ordered series of daily closing prices, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Parse a whitespace-delimited two-column table.
    ///
    /// Blank lines are skipped and tokens past the second column are ignored.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, SeriesError> {
        let mut points = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            let mut tokens = line.split_whitespace();

            let Some(date_token) = tokens.next() else {
                continue;
            };
            let Some(price_token) = tokens.next() else {
                return Err(SeriesError::MalformedRow { line: lineno });
            };

            let date = NaiveDate::parse_from_str(date_token, DATE_FORMAT).map_err(|_| {
                SeriesError::InvalidDate {
                    line: lineno,
                    token: date_token.to_string(),
                }
            })?;
            let price = price_token
                .parse::<f64>()
                .map_err(|_| SeriesError::InvalidPrice {
                    line: lineno,
                    token: price_token.to_string(),
                })?;

            points.push(PricePoint { date, price });
        }

        Ok(Self { points })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Take the trailing `num_days` observations.
    pub fn trailing(&self, num_days: usize) -> Result<PriceWindow, SeriesError> {
        if num_days < 2 {
            return Err(SeriesError::WindowTooShort(num_days));
        }
        if self.points.len() < num_days {
            return Err(SeriesError::InsufficientRows {
                required: num_days,
                available: self.points.len(),
            });
        }

        let tail = &self.points[self.points.len() - num_days..];
        // Non-empty: num_days >= 2 and tail.len() == num_days.
        let first_date = tail[0].date;

        Ok(PriceWindow {
            first_date,
            prices: tail.iter().map(|p| p.price).collect(),
        })
    }
}

/// The trailing window of a price series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    /// Date of the oldest observation in the window.
    pub first_date: NaiveDate,
    /// Closing prices, oldest first.
    pub prices: Vec<f64>,
}

impl PriceWindow {
    /// Window length in days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Path of the price file for `symbol` under `data_dir`.
#[must_use]
pub fn series_path(data_dir: &Path, symbol: &str) -> PathBuf {
    data_dir.join(format!("{}.{SERIES_EXTENSION}", symbol.to_uppercase()))
}

/// Load the trailing window of the file at `path`.
///
/// Returns `None` when the file is missing, unreadable, malformed, or too
/// short; the reason is logged at debug level only.
pub fn load_window(path: &Path, num_days: usize) -> Option<PriceWindow> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Price file unavailable");
            return None;
        }
    };

    let window = load_window_from_reader(BufReader::new(file), num_days);
    if window.is_none() {
        debug!(path = %path.display(), "Price file rejected");
    }
    window
}

/// Load the trailing window from an already-open source.
pub fn load_window_from_reader<R: BufRead>(reader: R, num_days: usize) -> Option<PriceWindow> {
    match PriceSeries::parse(reader).and_then(|series| series.trailing(num_days)) {
        Ok(window) => Some(window),
        Err(e) => {
            debug!(error = %e, num_days, "Price series not usable");
            None
        }
    }
}
