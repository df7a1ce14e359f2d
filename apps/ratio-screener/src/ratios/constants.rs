//! Constants for ratio calculations.

/// Trading days per year, used to annualize the Calmar return.
pub const TRADING_DAYS: f64 = 252.0;

/// Scale applied to the long-candidate/short-reference daily return.
pub const MARKET_NEUTRAL_SCALE: f64 = 0.5;

/// Target return for the Sortino downside deviation.
pub const SORTINO_TARGET: f64 = 0.0;

/// Threshold separating Omega gains from losses.
pub const OMEGA_THRESHOLD: f64 = 0.0;

/// Composite weights in order: Sharpe, Sortino, Information, Treynor, Calmar, Omega.
pub const WEIGHTS: [f64; 6] = [0.3, 0.2, 0.1, 0.2, 0.1, 0.1];
