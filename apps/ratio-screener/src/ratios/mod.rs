//! Risk-adjusted ratio computation for a candidate against a reference.
//!
//! All ratios except Treynor and Calmar are computed on the market-neutral
//! daily return series `(ret_candidate - ret_reference) * 0.5`:
//! - Sharpe ratio (scaled by `sqrt(N - 1)`)
//! - Sortino ratio (downside deviation below a zero target)
//! - Information ratio (mean over tracking error)
//! - Treynor ratio (excess cumulative return over beta)
//! - Calmar ratio (annualized return over maximum drawdown of the candidate)
//! - Omega ratio (gains over losses around a zero threshold)
//!
//! plus a fixed-weight composite of the six.

mod calculator;
mod constants;
mod math;
mod types;

pub use calculator::{RatioEngine, compute_ratios};
pub use constants::{TRADING_DAYS, WEIGHTS};
pub use math::{ReturnSeries, cumulative_return, max_drawdown, mean, population_std};
pub use types::{AbsentReason, RatioColumn, RatioResult};
