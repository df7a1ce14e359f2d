//! Concurrent download of trailing price windows.

use chrono::{Days, NaiveDate};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::api_types::DailyBar;
use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::source::PriceSource;
use crate::writer::{PriceRow, write_series};

/// What happened to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolOutcome {
    /// A full window was written.
    Written,
    /// Fewer rows than the window length; nothing written.
    Skipped,
    /// The fetch or write failed.
    Failed,
}

/// Counts for a fetch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Symbols whose price file was written.
    pub written: usize,
    /// Symbols with too little history.
    pub skipped: usize,
    /// Symbols whose fetch or write failed.
    pub failed: usize,
}

impl FetchSummary {
    fn record(&mut self, outcome: SymbolOutcome) {
        match outcome {
            SymbolOutcome::Written => self.written += 1,
            SymbolOutcome::Skipped => self.skipped += 1,
            SymbolOutcome::Failed => self.failed += 1,
        }
    }

    /// Symbols processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}

/// Downloads and stores trailing windows for a universe.
#[derive(Debug, Clone)]
pub struct Fetcher<S> {
    source: S,
    options: FetchOptions,
    today: NaiveDate,
}

impl<S: PriceSource> Fetcher<S> {
    /// Create a fetcher treating `today` as the last calendar day.
    #[must_use]
    pub const fn new(source: S, options: FetchOptions, today: NaiveDate) -> Self {
        Self {
            source,
            options,
            today,
        }
    }

    /// Run options.
    #[must_use]
    pub const fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Trailing window of closing prices for `symbol`, at most `ndays` rows.
    ///
    /// Placeholder bars are dropped. When the last bar is not dated today the
    /// latest trade price is appended under today's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or has no bars for the symbol.
    pub async fn fetch_window(&self, symbol: &str) -> Result<Vec<PriceRow>, FetchError> {
        let start = self
            .today
            .checked_sub_days(Days::new(self.options.lookback_days()))
            .unwrap_or(NaiveDate::MIN);

        let mut rows: Vec<PriceRow> = self
            .source
            .daily_bars(symbol, start, self.today)
            .await?
            .into_iter()
            .filter(DailyBar::is_traded)
            .map(|bar| PriceRow {
                date: bar.date,
                price: bar.close,
            })
            .collect();

        let Some(last) = rows.last() else {
            return Err(FetchError::NoBars {
                symbol: symbol.to_string(),
            });
        };

        if last.date != self.today {
            let price = self.source.latest_trade_price(symbol).await?;
            rows.push(PriceRow {
                date: self.today,
                price,
            });
        }

        let excess = rows.len().saturating_sub(self.options.ndays);
        rows.drain(..excess);
        Ok(rows)
    }

    /// Fetch and store one symbol.
    pub async fn fetch_symbol(&self, symbol: &str) -> SymbolOutcome {
        let rows = match self.fetch_window(symbol).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(symbol, error = %e, "Fetch failed");
                return SymbolOutcome::Failed;
            }
        };

        match write_series(&self.options.data_dir, symbol, &rows, self.options.ndays).await {
            Ok(true) => SymbolOutcome::Written,
            Ok(false) => {
                debug!(
                    symbol,
                    rows = rows.len(),
                    ndays = self.options.ndays,
                    "Not enough history, skipped"
                );
                SymbolOutcome::Skipped
            }
            Err(e) => {
                warn!(symbol, error = %e, "Write failed");
                SymbolOutcome::Failed
            }
        }
    }

    /// Fetch every symbol with at most `max_workers` in flight.
    ///
    /// Per-symbol failures are logged and counted; the run always completes.
    pub async fn run(&self, universe: &[String]) -> FetchSummary {
        let workers = self.options.max_workers.max(1);
        info!(symbols = universe.len(), workers, "Starting price fetch");

        let summary = stream::iter(universe)
            .map(|symbol| self.fetch_symbol(symbol))
            .buffer_unordered(workers)
            .fold(FetchSummary::default(), |mut summary, outcome| async move {
                summary.record(outcome);
                summary
            })
            .await;

        info!(
            written = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Price fetch complete"
        );
        summary
    }
}
