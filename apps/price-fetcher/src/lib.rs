// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening
    )
)]

//! Price Fetcher
//!
//! Downloads split-adjusted daily closing prices from the Alpaca market
//! data API and writes the trailing window of each symbol to
//! `<data_dir>/<SYMBOL>.dat`, the input format of the ratio screener.
//!
//! The fetch orchestration talks to a [`PriceSource`]; the HTTP adapter
//! is [`AlpacaPriceSource`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod api_types;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod source;
pub mod universe;
pub mod writer;

pub use api_types::DailyBar;
pub use config::{AlpacaConfig, FetchOptions, RetryConfig};
pub use error::{AlpacaError, FetchError};
pub use fetcher::{FetchSummary, Fetcher, SymbolOutcome};
pub use http_client::AlpacaHttpClient;
pub use source::{AlpacaPriceSource, PriceSource};
pub use universe::{parse_universe, read_universe};
pub use writer::{PriceRow, write_series};
