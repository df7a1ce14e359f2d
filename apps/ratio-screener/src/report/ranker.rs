//! Sorting of collected results into a report.

use std::io::{self, Write};

use crate::ratios::{RatioColumn, RatioResult};

use super::format::{format_header, format_row};

/// Results ordered ascending by one column.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    rows: Vec<RatioResult>,
    column: RatioColumn,
}

impl RankedReport {
    /// Sort `results` ascending by `column`.
    ///
    /// The sort is stable: rows with equal values keep their collection order.
    #[must_use]
    pub fn new(mut results: Vec<RatioResult>, column: RatioColumn) -> Self {
        results.sort_by(|a, b| a.cmp_by(b, column));
        Self {
            rows: results,
            column,
        }
    }

    /// Sort column.
    #[must_use]
    pub const fn column(&self) -> RatioColumn {
        self.column
    }

    /// Ordered rows.
    #[must_use]
    pub fn rows(&self) -> &[RatioResult] {
        &self.rows
    }

    /// Whether the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header (once) followed by one line per row.
    ///
    /// An empty report writes nothing, not even the header.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }

        writeln!(out, "{}", format_header())?;
        for row in &self.rows {
            writeln!(out, "{}", format_row(row))?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn result(symbol: &str, sharpe: f64, score: f64) -> RatioResult {
        RatioResult {
            symbol: symbol.to_string(),
            days: 504,
            cumulative_return: sharpe / 10.0,
            sharpe,
            sortino: score,
            information: 0.0,
            treynor: 0.0,
            calmar: 0.0,
            omega: 0.0,
            weighted_average: score,
        }
    }

    fn symbols(report: &RankedReport) -> Vec<&str> {
        report.rows().iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_sorts_ascending_by_composite() {
        let report = RankedReport::new(
            vec![
                result("CCC", 0.0, 3.0),
                result("AAA", 0.0, 1.0),
                result("BBB", 0.0, 2.0),
            ],
            RatioColumn::WeightedAverage,
        );
        assert_eq!(symbols(&report), vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_equal_values_keep_input_order() {
        let report = RankedReport::new(
            vec![
                result("ZZZ", 0.0, 1.0),
                result("MMM", 0.0, 0.5),
                result("AAA", 0.0, 1.0),
                result("QQQ", 0.0, 1.0),
            ],
            RatioColumn::WeightedAverage,
        );
        assert_eq!(symbols(&report), vec!["MMM", "ZZZ", "AAA", "QQQ"]);
    }

    #[test_case(RatioColumn::Symbol, &["AAA", "BBB", "CCC"] ; "by symbol")]
    #[test_case(RatioColumn::CumulativeReturn, &["CCC", "AAA", "BBB"] ; "by cumulative return")]
    #[test_case(RatioColumn::Sharpe, &["CCC", "AAA", "BBB"] ; "by sharpe")]
    #[test_case(RatioColumn::WeightedAverage, &["BBB", "CCC", "AAA"] ; "by composite")]
    fn test_sort_column(column: RatioColumn, expected: &[&str]) {
        let report = RankedReport::new(
            vec![
                result("BBB", 2.0, -1.0),
                result("AAA", 1.0, 5.0),
                result("CCC", -3.0, 0.0),
            ],
            column,
        );
        assert_eq!(report.column(), column);
        assert_eq!(symbols(&report), expected);
    }

    #[test]
    fn test_nan_rows_sort_last() {
        let report = RankedReport::new(
            vec![
                result("NAN", 0.0, f64::NAN),
                result("HIGH", 0.0, 9.0),
                result("LOW", 0.0, -9.0),
            ],
            RatioColumn::Sortino,
        );
        assert_eq!(symbols(&report), vec!["LOW", "HIGH", "NAN"]);
    }

    #[test]
    fn test_render_writes_header_once() {
        let report = RankedReport::new(
            vec![result("AAA", 0.0, 1.0), result("BBB", 0.0, 2.0)],
            RatioColumn::WeightedAverage,
        );
        let mut out = Vec::new();
        report.render(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Symbol"));
        assert!(lines[1].starts_with("AAA"));
        assert!(lines[2].starts_with("BBB"));
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        let report = RankedReport::new(Vec::new(), RatioColumn::WeightedAverage);
        let mut out = Vec::new();
        report.render(&mut out).unwrap();

        assert!(report.is_empty());
        assert!(out.is_empty());
    }
}
