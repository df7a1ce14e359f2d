//! Statistical math utilities for ratio calculations.
//!
//! Empty inputs yield NaN rather than an error so that undefined statistics
//! flow through to the ratio policies that decide what to do with them.

/// Simple daily returns derived from a price path.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// `ret[i] = (p[i+1] - p[i]) / p[i]`, one element shorter than `prices`.
    #[must_use]
    pub fn from_prices(prices: &[f64]) -> Self {
        Self(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Compound the returns back into a cumulative return.
    #[must_use]
    pub fn compounded(&self) -> f64 {
        self.0.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
    }
}

/// Arithmetic mean; NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n); NaN when empty.
pub fn population_variance(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg.is_nan() {
        return f64::NAN;
    }
    values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation; NaN when empty.
pub fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Sample covariance (divides by n - 1).
///
/// `None` when the slices differ in length or hold fewer than two values.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let sum: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    Some(sum / (xs.len() - 1) as f64)
}

/// `p[last] / p[0] - 1`; NaN when empty.
pub fn cumulative_return(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => last / first - 1.0,
        _ => f64::NAN,
    }
}

/// Largest `running_max / price - 1` along the path; 0 for a path that never falls.
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;

    for &price in prices {
        peak = peak.max(price);
        worst = worst.max(peak / price - 1.0);
    }

    worst
}
