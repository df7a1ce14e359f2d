//! Core types for ratio results.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ratios computed for one candidate symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    /// Candidate symbol.
    pub symbol: String,
    /// Window length in days.
    pub days: usize,
    /// Candidate cumulative return over the window (decimal, 0.04 = 4%).
    pub cumulative_return: f64,
    /// Sharpe ratio of the market-neutral series.
    pub sharpe: f64,
    /// Sortino ratio of the market-neutral series (may be NaN).
    pub sortino: f64,
    /// Information ratio of the market-neutral series.
    pub information: f64,
    /// Treynor ratio of the candidate against the reference.
    pub treynor: f64,
    /// Calmar ratio of the candidate price path.
    pub calmar: f64,
    /// Omega ratio of the market-neutral series.
    pub omega: f64,
    /// Fixed-weight blend of the six ratios.
    pub weighted_average: f64,
}

impl RatioResult {
    /// Value of a numeric column, `None` for the symbol column.
    #[must_use]
    pub fn value(&self, column: RatioColumn) -> Option<f64> {
        match column {
            RatioColumn::Symbol => None,
            RatioColumn::Days => Some(self.days as f64),
            RatioColumn::CumulativeReturn => Some(self.cumulative_return),
            RatioColumn::Sharpe => Some(self.sharpe),
            RatioColumn::Sortino => Some(self.sortino),
            RatioColumn::Information => Some(self.information),
            RatioColumn::Treynor => Some(self.treynor),
            RatioColumn::Calmar => Some(self.calmar),
            RatioColumn::Omega => Some(self.omega),
            RatioColumn::WeightedAverage => Some(self.weighted_average),
        }
    }

    /// Ascending comparison on `column`.
    ///
    /// Floats use IEEE total ordering, so NaN sorts after every number.
    #[must_use]
    pub fn cmp_by(&self, other: &Self, column: RatioColumn) -> Ordering {
        match column {
            RatioColumn::Symbol => self.symbol.cmp(&other.symbol),
            RatioColumn::Days => self.days.cmp(&other.days),
            _ => {
                let a = self.value(column).unwrap_or(f64::NAN);
                let b = other.value(column).unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
    }
}

/// Report columns, indexed from 0 in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioColumn {
    /// Symbol.
    Symbol,
    /// Window length.
    Days,
    /// Cumulative return.
    CumulativeReturn,
    /// Sharpe ratio.
    Sharpe,
    /// Sortino ratio.
    Sortino,
    /// Information ratio.
    Information,
    /// Treynor ratio.
    Treynor,
    /// Calmar ratio.
    Calmar,
    /// Omega ratio.
    Omega,
    /// Composite score.
    #[default]
    WeightedAverage,
}

impl RatioColumn {
    /// All columns in display order.
    pub const ALL: [Self; 10] = [
        Self::Symbol,
        Self::Days,
        Self::CumulativeReturn,
        Self::Sharpe,
        Self::Sortino,
        Self::Information,
        Self::Treynor,
        Self::Calmar,
        Self::Omega,
        Self::WeightedAverage,
    ];

    /// Column at a 0-based index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 0-based index of the column.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Symbol => "Symbol",
            Self::Days => "Days",
            Self::CumulativeReturn => "Cumulative Return",
            Self::Sharpe => "Sharpe Ratio",
            Self::Sortino => "Sortino Ratio",
            Self::Information => "Information Ratio",
            Self::Treynor => "Treynor Ratio",
            Self::Calmar => "Calmar Ratio",
            Self::Omega => "Omega Ratio",
            Self::WeightedAverage => "Weighted Average",
        }
    }

    /// Display width of the column.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Symbol => 6,
            Self::Days => 5,
            Self::CumulativeReturn | Self::Information => 17,
            Self::WeightedAverage => 16,
            Self::Sharpe | Self::Sortino | Self::Treynor | Self::Calmar | Self::Omega => 14,
        }
    }
}

/// Why a candidate produced no ratios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The reference series could not be loaded.
    ReferenceUnavailable,
    /// The candidate series could not be loaded.
    MissingData,
    /// The windows start on different dates.
    WindowMismatch {
        /// First date of the reference window.
        reference: NaiveDate,
        /// First date of the candidate window.
        candidate: NaiveDate,
    },
    /// The windows differ in length.
    LengthMismatch {
        /// Reference window length.
        reference: usize,
        /// Candidate window length.
        candidate: usize,
    },
}

impl std::fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceUnavailable => write!(f, "reference series unavailable"),
            Self::MissingData => write!(f, "price series unavailable"),
            Self::WindowMismatch {
                reference,
                candidate,
            } => write!(
                f,
                "window starts {candidate}, reference window starts {reference}"
            ),
            Self::LengthMismatch {
                reference,
                candidate,
            } => write!(
                f,
                "window has {candidate} days, reference window has {reference}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(symbol: &str, score: f64) -> RatioResult {
        RatioResult {
            symbol: symbol.to_string(),
            days: 504,
            cumulative_return: 0.0,
            sharpe: 0.0,
            sortino: 0.0,
            information: 0.0,
            treynor: 0.0,
            calmar: 0.0,
            omega: 0.0,
            weighted_average: score,
        }
    }

    #[test]
    fn column_indices_round_trip() {
        for (i, column) in RatioColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(RatioColumn::from_index(i), Some(*column));
        }
        assert_eq!(RatioColumn::from_index(10), None);
    }

    #[test]
    fn default_column_is_composite() {
        assert_eq!(RatioColumn::default(), RatioColumn::WeightedAverage);
        assert_eq!(RatioColumn::default().index(), 9);
    }

    #[test]
    fn nan_sorts_last() {
        let a = result("AAA", f64::NAN);
        let b = result("BBB", 1.0);
        assert_eq!(a.cmp_by(&b, RatioColumn::WeightedAverage), Ordering::Greater);
        assert_eq!(b.cmp_by(&a, RatioColumn::WeightedAverage), Ordering::Less);
    }

    #[test]
    fn symbol_column_sorts_lexicographically() {
        let a = result("AAPL", 0.0);
        let b = result("MSFT", 0.0);
        assert_eq!(a.cmp_by(&b, RatioColumn::Symbol), Ordering::Less);
        assert_eq!(a.value(RatioColumn::Symbol), None);
    }

    #[test]
    fn absent_reason_display() {
        let reason = AbsentReason::LengthMismatch {
            reference: 504,
            candidate: 200,
        };
        assert_eq!(
            reason.to_string(),
            "window has 200 days, reference window has 504"
        );
    }
}
