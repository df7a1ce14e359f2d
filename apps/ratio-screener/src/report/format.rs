//! Fixed-width formatting of report rows.
//!
//! Column layout: `Symbol(6) Days(5) CumulativeReturn%(17,.4f)
//! Sharpe(14,.8f) Sortino(14,.8f) Information(17,.8f) Treynor(14,.8f)
//! Calmar(14,.8f) Omega(14,.8f) WeightedAverage(16,.8f)`.

use std::fmt::Write;

use crate::ratios::{RatioColumn, RatioResult};

/// Decimal places of the cumulative return percentage.
const PCT_PRECISION: usize = 4;

/// Decimal places of every ratio column.
const RATIO_PRECISION: usize = 8;

/// Header row with every label right-aligned to its column width.
#[must_use]
pub fn format_header() -> String {
    RatioColumn::ALL
        .iter()
        .map(|c| format!("{:>width$}", c.label(), width = c.width()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One data row.
#[must_use]
pub fn format_row(result: &RatioResult) -> String {
    let mut row = format!(
        "{:<sw$} {:>dw$} {}",
        result.symbol,
        result.days,
        format_float(
            result.cumulative_return * 100.0,
            RatioColumn::CumulativeReturn.width(),
            PCT_PRECISION
        ),
        sw = RatioColumn::Symbol.width(),
        dw = RatioColumn::Days.width(),
    );

    for column in &RatioColumn::ALL[RatioColumn::Sharpe.index()..] {
        let value = result.value(*column).unwrap_or(f64::NAN);
        let _ = write!(
            row,
            " {}",
            format_float(value, column.width(), RATIO_PRECISION)
        );
    }

    row
}

/// Right-aligned fixed-precision float; NaN renders as `nan`.
fn format_float(value: f64, width: usize, precision: usize) -> String {
    if value.is_nan() {
        format!("{:>width$}", "nan")
    } else {
        format!("{value:>width$.precision$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RatioResult {
        RatioResult {
            symbol: "AAPL".to_string(),
            days: 504,
            cumulative_return: 0.04,
            sharpe: 0.251_419_406_640_612_74,
            sortino: f64::NAN,
            information: 0.125_709_703_320_306_37,
            treynor: -0.5,
            calmar: 152.366_827_162_721_2,
            omega: 1.435_085_164_273_069_3,
            weighted_average: 1.0,
        }
    }

    #[test]
    fn test_header_layout() {
        let header = format_header();
        assert!(header.starts_with("Symbol  Days Cumulative Return   Sharpe Ratio"));
        assert!(header.ends_with("Weighted Average"));
        assert_eq!(header.len(), 6 + 5 + 17 + 14 + 14 + 17 + 14 + 14 + 14 + 16 + 9);
    }

    #[test]
    fn test_row_layout() {
        let row = format_row(&sample());
        assert_eq!(row.len(), format_header().len());
        assert!(row.starts_with("AAPL     504            4.0000     0.25141941"));
        assert!(row.contains("            nan"));
        assert!(row.contains("    -0.50000000"));
        assert!(row.ends_with("      1.00000000"));
    }

    #[test]
    fn test_long_symbol_is_not_truncated() {
        let mut result = sample();
        result.symbol = "BRK.B.X".to_string();
        assert!(format_row(&result).starts_with("BRK.B.X   504"));
    }

    #[test]
    fn test_format_float_infinity() {
        assert_eq!(format_float(f64::INFINITY, 6, 2), "   inf");
        assert_eq!(format_float(f64::NAN, 6, 2), "   nan");
        assert_eq!(format_float(1.5, 6, 2), "  1.50");
    }
}
