//! Job types for batch execution.

use std::path::PathBuf;

use crate::ratios::{AbsentReason, RatioResult};

/// One symbol to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolJob {
    /// Upper-cased symbol.
    pub symbol: String,
    /// Price file for the symbol.
    pub path: PathBuf,
}

/// Result of evaluating one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Ratios were computed.
    Computed(RatioResult),
    /// The symbol produced no ratios.
    Absent {
        /// Symbol that was skipped.
        symbol: String,
        /// Why it was skipped.
        reason: AbsentReason,
    },
}

impl JobOutcome {
    /// Whether ratios were computed.
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Symbol the outcome belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Computed(result) => &result.symbol,
            Self::Absent { symbol, .. } => symbol,
        }
    }

    /// The computed ratios, if any.
    #[must_use]
    pub fn into_result(self) -> Option<RatioResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Absent { .. } => None,
        }
    }
}
