//! Ranking and fixed-width rendering of ratio results.

mod format;
mod ranker;

pub use format::{format_header, format_row};
pub use ranker::RankedReport;
