//! Price source port and its Alpaca adapter.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api_types::{BarsResponse, DailyBar, LatestTradeResponse};
use crate::error::FetchError;
use crate::http_client::AlpacaHttpClient;

/// Largest page the bars endpoint serves.
const BARS_PAGE_LIMIT: u32 = 10_000;

/// Source of daily bars and latest trade prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Split-adjusted daily bars for `symbol` from `start` through `end`,
    /// oldest first.
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError>;

    /// Price of the most recent trade for `symbol`.
    async fn latest_trade_price(&self, symbol: &str) -> Result<f64, FetchError>;
}

/// [`PriceSource`] backed by the Alpaca market data API.
#[derive(Debug, Clone)]
pub struct AlpacaPriceSource {
    http: AlpacaHttpClient,
}

impl AlpacaPriceSource {
    /// Wrap an HTTP client.
    #[must_use]
    pub const fn new(http: AlpacaHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PriceSource for AlpacaPriceSource {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let path = format!("/v2/stocks/{symbol}/bars");
        let query = [
            ("timeframe", "1Day".to_string()),
            ("start", start.to_string()),
            ("end", end.to_string()),
            ("adjustment", "split".to_string()),
            ("limit", BARS_PAGE_LIMIT.to_string()),
        ];

        let pages: Vec<BarsResponse> = self.http.get_paged(&path, &query).await?;
        let bars: Vec<DailyBar> = pages
            .into_iter()
            .flat_map(|page| page.bars.unwrap_or_default())
            .map(DailyBar::from)
            .collect();

        tracing::debug!(symbol, bars = bars.len(), "Fetched daily bars");
        Ok(bars)
    }

    async fn latest_trade_price(&self, symbol: &str) -> Result<f64, FetchError> {
        let path = format!("/v2/stocks/{symbol}/trades/latest");
        let latest: LatestTradeResponse = self.http.get(&path, &[]).await?;
        Ok(latest.trade.price)
    }
}
