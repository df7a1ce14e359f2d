// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::suboptimal_flops
    )
)]

//! Ratio Screener
//!
//! Ranks a universe of instruments by risk-adjusted performance measured
//! against a reference instrument, using local daily closing-price files.
//!
//! # Modules
//!
//! - `series`: price-file parsing and trailing-window extraction
//! - `ratios`: market-neutral returns and the six ratios plus composite
//! - `batch`: bounded parallel evaluation of a symbol universe
//! - `report`: stable ranking and fixed-width rendering
//! - `screener`: list, single-symbol and piped input modes
//! - `config`, `cli`, `telemetry`: settings, flags and logging
//!
//! # Example
//!
//! ```rust,ignore
//! use ratio_screener::{RankedReport, RatioColumn, Screener, ScreenerConfig};
//!
//! let screener = Screener::new(&ScreenerConfig::default());
//! let results = screener.run_list(&["AAPL".to_string(), "MSFT".to_string()])?;
//! RankedReport::new(results, RatioColumn::WeightedAverage).render(&mut std::io::stdout())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod ratios;
pub mod report;
pub mod screener;
pub mod series;
pub mod telemetry;

pub use batch::{BatchConfig, BatchExecutor, BatchResult, JobOutcome, SymbolJob};
pub use cli::{Args, Mode, PIPED_LABEL};
pub use config::{ConfigError, ScreenerConfig, load_config, load_config_from_string};
pub use error::ScreenerError;
pub use ratios::{AbsentReason, RatioColumn, RatioEngine, RatioResult, compute_ratios};
pub use report::{RankedReport, format_header, format_row};
pub use screener::{Screener, normalize_symbol, parse_symbol_list, read_symbol_list};
pub use series::{PriceWindow, SeriesError, load_window, load_window_from_reader, series_path};
pub use telemetry::init_tracing;
