//! Alpaca market data response types.
//!
//! These types map directly to Alpaca's REST API format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

// ============================================================================
// Bars
// ============================================================================

/// One page of `GET /v2/stocks/{symbol}/bars`.
#[derive(Debug, Clone, Deserialize)]
pub struct BarsResponse {
    /// Bars on this page; null when the range is empty.
    #[serde(default)]
    pub bars: Option<Vec<AlpacaBar>>,
    /// Requested symbol.
    #[serde(default)]
    pub symbol: String,
    /// Token for the next page, absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A response that may continue on another page.
pub trait Paged {
    /// Token for the following page; `None` on the last page.
    fn next_page_token(&self) -> Option<&str>;
}

impl Paged for BarsResponse {
    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// A single OHLCV bar.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaBar {
    /// Bar start time.
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    /// Close price.
    #[serde(rename = "c")]
    pub close: f64,
    /// Volume.
    #[serde(rename = "v", default)]
    pub volume: u64,
    /// Number of trades.
    #[serde(rename = "n", default)]
    pub trade_count: u64,
    /// Volume-weighted average price.
    #[serde(rename = "vw", default)]
    pub vwap: f64,
}

/// A daily bar reduced to what the price files need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Volume.
    pub volume: u64,
    /// Number of trades.
    pub trade_count: u64,
    /// Volume-weighted average price.
    pub vwap: f64,
}

impl DailyBar {
    /// Whether the bar reflects actual trading.
    ///
    /// Bars with zero volume, trade count or VWAP are placeholders.
    #[must_use]
    pub fn is_traded(&self) -> bool {
        self.volume != 0 && self.trade_count != 0 && self.vwap != 0.0
    }
}

impl From<AlpacaBar> for DailyBar {
    fn from(bar: AlpacaBar) -> Self {
        Self {
            date: bar.timestamp.date_naive(),
            close: bar.close,
            volume: bar.volume,
            trade_count: bar.trade_count,
            vwap: bar.vwap,
        }
    }
}

// ============================================================================
// Trades
// ============================================================================

/// Response of `GET /v2/stocks/{symbol}/trades/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestTradeResponse {
    /// Requested symbol.
    #[serde(default)]
    pub symbol: String,
    /// The latest trade.
    pub trade: AlpacaTrade,
}

/// A single trade.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaTrade {
    /// Trade time.
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    /// Trade price.
    #[serde(rename = "p")]
    pub price: f64,
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaErrorResponse {
    /// Numeric error code, when present.
    #[serde(default)]
    pub code: Option<u64>,
    /// Error message.
    #[serde(default)]
    pub message: String,
}
