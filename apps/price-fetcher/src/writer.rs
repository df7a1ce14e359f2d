//! Price file output.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::FetchError;

/// One `<date> <price>` line of a price file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRow {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub price: f64,
}

/// Path of the price file for `symbol`.
#[must_use]
pub fn series_path(data_dir: &Path, symbol: &str) -> PathBuf {
    data_dir.join(format!("{}.dat", symbol.to_uppercase()))
}

/// Render rows as price-file text.
#[must_use]
pub fn render_rows(rows: &[PriceRow]) -> String {
    let mut text = String::with_capacity(rows.len() * 20);
    for row in rows {
        let _ = writeln!(text, "{} {}", row.date.format("%Y-%m-%d"), row.price);
    }
    text
}

/// Write `<data_dir>/<SYMBOL>.dat` when exactly `ndays` rows are available.
///
/// Returns whether the file was written. A short series leaves any existing
/// file untouched.
///
/// # Errors
///
/// Returns `FetchError::Write` if the file cannot be written.
pub async fn write_series(
    data_dir: &Path,
    symbol: &str,
    rows: &[PriceRow],
    ndays: usize,
) -> Result<bool, FetchError> {
    if rows.len() != ndays {
        return Ok(false);
    }

    let path = series_path(data_dir, symbol);
    tokio::fs::write(&path, render_rows(rows))
        .await
        .map_err(|source| FetchError::Write {
            path: path.display().to_string(),
            source,
        })?;
    Ok(true)
}
