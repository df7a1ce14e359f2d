//! Command-line arguments and input mode selection.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ScreenerConfig, load_config};

/// Symbol label used for a series read from standard input.
pub const PIPED_LABEL: &str = "STDIN";

/// Rank symbols by risk-adjusted ratios against a reference.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ratio-screener", version, about)]
pub struct Args {
    /// Reference symbol, or a path to its price file [default: SPY]
    #[arg(short = 'r', long)]
    pub reference: Option<String>,

    /// Trailing window length in trading days [default: 504]
    #[arg(short = 'n', long = "num-days")]
    pub num_days: Option<usize>,

    /// File with one symbol per line
    #[arg(short = 'l', long)]
    pub list: Option<PathBuf>,

    /// Single symbol to evaluate
    #[arg(short = 's', long)]
    pub symbol: Option<String>,

    /// 0-based sort column, 0 = Symbol ... 9 = Weighted Average [default: 9]
    #[arg(short = 'c', long = "sort-column")]
    pub sort_column: Option<usize>,

    /// Directory holding <SYMBOL>.dat price files [default: ./data]
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Resolve settings: flags over the config file over defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be loaded or the merged
    /// settings are invalid.
    pub fn settings(&self) -> Result<ScreenerConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                load_config(Some(&*path))?
            }
            None => ScreenerConfig::default(),
        };

        let merged = self.apply_overrides(base);
        merged.validate()?;
        Ok(merged)
    }

    /// Overlay every flag that was given on `config`.
    #[must_use]
    pub fn apply_overrides(&self, mut config: ScreenerConfig) -> ScreenerConfig {
        if let Some(reference) = &self.reference {
            config.reference.clone_from(reference);
        }
        if let Some(num_days) = self.num_days {
            config.num_days = num_days;
        }
        if let Some(sort_column) = self.sort_column {
            config.sort_column = sort_column;
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir.clone_from(data_dir);
        }
        config
    }
}

/// Which input the run evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Every symbol listed in a file.
    List(PathBuf),
    /// One named symbol.
    Symbol(String),
    /// A series piped on standard input.
    Piped,
    /// Nothing to do; print help.
    Usage,
}

impl Mode {
    /// Pick the mode: list, then symbol, then piped input, then usage.
    #[must_use]
    pub fn detect(args: &Args, stdin_is_terminal: bool) -> Self {
        if let Some(list) = &args.list {
            return Self::List(list.clone());
        }
        if let Some(symbol) = &args.symbol {
            return Self::Symbol(symbol.clone());
        }
        if stdin_is_terminal {
            Self::Usage
        } else {
            Self::Piped
        }
    }
}
