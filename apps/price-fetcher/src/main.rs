//! Price Fetcher binary.
//!
//! Reads a symbol list, downloads each symbol's trailing daily closes and
//! writes one price file per symbol.
//!
//! # Environment Variables
//!
//! - `APCA_API_KEY_ID`: Alpaca API key (required)
//! - `APCA_API_SECRET_KEY`: Alpaca API secret (required)
//! - `APCA_API_DATA_URL`: market data base URL (default: https://data.alpaca.markets)
//! - `RUST_LOG`: log filter (default: price_fetcher=info)

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use price_fetcher::{
    AlpacaConfig, AlpacaHttpClient, AlpacaPriceSource, FetchOptions, Fetcher, read_universe,
};

/// Download daily closing prices for a symbol list.
#[derive(Debug, Parser)]
#[command(name = "price-fetcher", version, about)]
struct Args {
    /// File with one symbol per line
    #[arg(long, default_value = "momentum.lis")]
    list: PathBuf,

    /// Trading days to keep per symbol
    #[arg(long, default_value_t = 504)]
    ndays: usize,

    /// Reference symbol always fetched
    #[arg(long, default_value = "SPY")]
    reference: String,

    /// Directory receiving <SYMBOL>.dat files
    #[arg(long = "data-dir", default_value = "./data")]
    data_dir: PathBuf,

    /// Symbols fetched concurrently
    #[arg(long = "max-workers", default_value_t = 100)]
    max_workers: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let args = Args::parse();
    anyhow::ensure!(args.ndays >= 2, "--ndays must be at least 2");

    let config = AlpacaConfig::from_env()?;
    let universe = read_universe(&args.list, &args.reference)?;

    tokio::fs::create_dir_all(&args.data_dir)
        .await
        .with_context(|| format!("Failed to create {}", args.data_dir.display()))?;

    let http = AlpacaHttpClient::new(&config)?;
    let options = FetchOptions {
        ndays: args.ndays,
        data_dir: args.data_dir,
        max_workers: args.max_workers,
    };
    let today = chrono::Local::now().date_naive();

    tracing::info!(
        data_url = %config.data_base_url,
        ndays = options.ndays,
        lookback_days = options.lookback_days(),
        %today,
        "Fetching prices"
    );

    let fetcher = Fetcher::new(AlpacaPriceSource::new(http), options, today);
    let summary = fetcher.run(&universe).await;

    if summary.written == 0 && summary.total() > 0 {
        tracing::warn!("No price files written");
    }
    Ok(())
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses a static directive string that is a compile-time constant guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "price_fetcher=info"
                    .parse()
                    .expect("static directive 'price_fetcher=info' is valid"),
            ),
        )
        .init();
}
