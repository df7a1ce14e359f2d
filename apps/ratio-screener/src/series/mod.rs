//! Daily closing-price series.
//!
//! A price file holds one `<YYYY-MM-DD> <price>` row per trading day in
//! chronological order with no header. The screener only ever looks at the
//! trailing window of a file, so the loader hands back a [`PriceWindow`]:
//! the first date of that window plus its prices.

mod error;
mod loader;

pub use error::SeriesError;
pub use loader::{
    PricePoint, PriceSeries, PriceWindow, load_window, load_window_from_reader, series_path,
};
pub(crate) use loader::SERIES_EXTENSION;
