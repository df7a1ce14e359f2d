//! Ratio engine for a candidate series against a reference series.

use crate::series::PriceWindow;

use super::constants::{
    MARKET_NEUTRAL_SCALE, OMEGA_THRESHOLD, SORTINO_TARGET, TRADING_DAYS, WEIGHTS,
};
use super::math::{
    ReturnSeries, cumulative_return, max_drawdown, mean, population_std, population_variance,
    sample_covariance,
};
use super::types::{AbsentReason, RatioResult};

/// Computes ratios for candidates against one reference window.
///
/// The reference returns are derived once and shared by every evaluation,
/// so a single engine can be borrowed by all workers of a batch.
#[derive(Debug, Clone)]
pub struct RatioEngine {
    reference: PriceWindow,
    reference_returns: ReturnSeries,
    reference_cumulative: f64,
    reference_variance: f64,
}

impl RatioEngine {
    /// Create an engine for the given reference window.
    #[must_use]
    pub fn new(reference: PriceWindow) -> Self {
        let reference_returns = ReturnSeries::from_prices(&reference.prices);
        let reference_cumulative = cumulative_return(&reference.prices);
        let reference_variance = population_variance(reference_returns.as_slice());

        Self {
            reference,
            reference_returns,
            reference_cumulative,
            reference_variance,
        }
    }

    /// The reference window.
    #[must_use]
    pub const fn reference(&self) -> &PriceWindow {
        &self.reference
    }

    /// Compute all ratios for `candidate`.
    ///
    /// Fails with the reason the two windows are not comparable.
    pub fn evaluate(
        &self,
        symbol: &str,
        candidate: &PriceWindow,
    ) -> Result<RatioResult, AbsentReason> {
        if candidate.first_date != self.reference.first_date {
            return Err(AbsentReason::WindowMismatch {
                reference: self.reference.first_date,
                candidate: candidate.first_date,
            });
        }
        if candidate.len() != self.reference.len() {
            return Err(AbsentReason::LengthMismatch {
                reference: self.reference.len(),
                candidate: candidate.len(),
            });
        }

        let prices = candidate.prices.as_slice();
        let days = prices.len();
        let returns = ReturnSeries::from_prices(prices);
        let cumulative = cumulative_return(prices);

        let neutral: Vec<f64> = returns
            .as_slice()
            .iter()
            .zip(self.reference_returns.as_slice())
            .map(|(c, r)| (c - r) * MARKET_NEUTRAL_SCALE)
            .collect();
        let neutral_mean = mean(&neutral);
        let neutral_std = population_std(&neutral);

        let sharpe = sharpe_ratio(neutral_mean, neutral_std, days);
        let sortino = sortino_ratio(&neutral);
        let information = information_ratio(neutral_mean, neutral_std);
        let treynor = self.treynor_ratio(&returns, cumulative);
        let calmar = calmar_ratio(prices);
        let omega = omega_ratio(&neutral);

        let weighted_average: f64 = [sharpe, sortino, information, treynor, calmar, omega]
            .iter()
            .zip(WEIGHTS)
            .map(|(ratio, weight)| ratio * weight)
            .sum();

        Ok(RatioResult {
            symbol: symbol.to_string(),
            days,
            cumulative_return: cumulative,
            sharpe,
            sortino,
            information,
            treynor,
            calmar,
            omega,
            weighted_average,
        })
    }

    /// Beta = cov(ref, cand) / var(ref); taken as 0 when undefined.
    fn beta(&self, returns: &ReturnSeries) -> f64 {
        if self.reference_variance.is_nan() || self.reference_variance <= 0.0 {
            return 0.0;
        }
        sample_covariance(self.reference_returns.as_slice(), returns.as_slice())
            .map_or(0.0, |cov| cov / self.reference_variance)
    }

    fn treynor_ratio(&self, returns: &ReturnSeries, cumulative: f64) -> f64 {
        let beta = self.beta(returns);
        if beta == 0.0 {
            return 0.0;
        }
        (cumulative - self.reference_cumulative) / beta
    }
}

/// Compute ratios for `candidate` against `reference`.
///
/// `None` when either window is absent or the windows are not comparable.
pub fn compute_ratios(
    symbol: &str,
    reference: Option<&PriceWindow>,
    candidate: Option<&PriceWindow>,
) -> Option<RatioResult> {
    let (reference, candidate) = (reference?, candidate?);
    RatioEngine::new(reference.clone())
        .evaluate(symbol, candidate)
        .ok()
}

fn sharpe_ratio(neutral_mean: f64, neutral_std: f64, days: usize) -> f64 {
    if neutral_std > 0.0 {
        ((days - 1) as f64).sqrt() * neutral_mean / neutral_std
    } else {
        0.0
    }
}

/// Unlike the other ratios there is no zero fallback: no downside
/// observations, or a zero downside deviation, yields NaN.
fn sortino_ratio(neutral: &[f64]) -> f64 {
    let downside: Vec<f64> = neutral
        .iter()
        .copied()
        .filter(|r| *r < SORTINO_TARGET)
        .collect();
    let downside_std = population_std(&downside);

    if downside_std > 0.0 {
        let excess: Vec<f64> = neutral.iter().map(|r| r - SORTINO_TARGET).collect();
        mean(&excess) / downside_std
    } else {
        f64::NAN
    }
}

fn information_ratio(neutral_mean: f64, tracking_error: f64) -> f64 {
    if tracking_error > 0.0 {
        neutral_mean / tracking_error
    } else {
        0.0
    }
}

fn calmar_ratio(prices: &[f64]) -> f64 {
    let drawdown = max_drawdown(prices);
    if drawdown == 0.0 {
        return 0.0;
    }
    let growth = prices[prices.len() - 1] / prices[0];
    let annualized = growth.powf(TRADING_DAYS / prices.len() as f64) - 1.0;
    annualized / drawdown
}

fn omega_ratio(neutral: &[f64]) -> f64 {
    let (gains, losses) = neutral.iter().fold((0.0, 0.0), |(g, l), &r| {
        if r > OMEGA_THRESHOLD {
            (g + r, l)
        } else {
            (g, l + r)
        }
    });

    if losses == 0.0 {
        0.0
    } else {
        gains / -losses
    }
}
