//! Run orchestration for the three input modes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::batch::{BatchError, BatchExecutor, BatchResult, JobOutcome, SymbolJob};
use crate::config::ScreenerConfig;
use crate::error::ScreenerError;
use crate::ratios::{AbsentReason, RatioEngine, RatioResult};
use crate::series::{
    PriceWindow, SERIES_EXTENSION, load_window, load_window_from_reader, series_path,
};

/// Trim and upper-case a symbol; `None` for a blank entry.
#[must_use]
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_uppercase())
    }
}

/// Reference symbol from a symbol or a price-file path.
///
/// `data/spy.dat` and `SPY` both name `SPY`. A dotted ticker such as
/// `BRK.B` is a symbol, not a file name; only a directory part or a
/// trailing `.dat` marks a path.
#[must_use]
pub fn reference_symbol(raw: &str) -> String {
    let raw = raw.trim();
    let path = Path::new(raw);
    let names_file = path.components().count() > 1
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SERIES_EXTENSION));

    match path.file_stem() {
        Some(stem) if names_file => stem.to_string_lossy().to_uppercase(),
        _ => raw.to_uppercase(),
    }
}

/// Symbols from a list, one per line, skipping blank lines.
///
/// # Errors
///
/// Returns an IO error if the source cannot be read.
pub fn parse_symbol_list<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut symbols = Vec::new();
    for line in reader.lines() {
        if let Some(symbol) = normalize_symbol(&line?) {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

/// Read a symbol list file.
///
/// # Errors
///
/// Returns `ScreenerError::ListRead` if the file cannot be opened or read.
pub fn read_symbol_list(path: &Path) -> Result<Vec<String>, ScreenerError> {
    let list_error = |source| ScreenerError::ListRead {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(list_error)?;
    parse_symbol_list(BufReader::new(file)).map_err(list_error)
}

/// Evaluates candidates from the data directory against one reference.
#[derive(Debug, Clone)]
pub struct Screener {
    reference: String,
    num_days: usize,
    data_dir: PathBuf,
    executor: BatchExecutor,
}

impl Screener {
    /// Create a screener from resolved settings.
    #[must_use]
    pub fn new(config: &ScreenerConfig) -> Self {
        Self {
            reference: reference_symbol(&config.reference),
            num_days: config.num_days,
            data_dir: config.data_dir.clone(),
            executor: BatchExecutor::new(config.parallel.clone()),
        }
    }

    /// Reference symbol.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Trailing window of the reference, if it loads.
    #[must_use]
    pub fn reference_window(&self) -> Option<PriceWindow> {
        load_window(&series_path(&self.data_dir, &self.reference), self.num_days)
    }

    /// Evaluate every listed symbol except the reference.
    ///
    /// Symbols that produce no ratios are dropped. An unavailable reference
    /// or an empty list yields an empty result set.
    ///
    /// # Errors
    ///
    /// Returns `ScreenerError::Batch` if the worker pool cannot be built.
    pub fn run_list(&self, symbols: &[String]) -> Result<Vec<RatioResult>, ScreenerError> {
        let jobs: Vec<SymbolJob> = symbols
            .iter()
            .filter_map(|s| normalize_symbol(s))
            .filter(|s| *s != self.reference)
            .map(|symbol| SymbolJob {
                path: series_path(&self.data_dir, &symbol),
                symbol,
            })
            .collect();

        let Some(reference) = self.reference_window() else {
            debug!(reference = %self.reference, "Reference unavailable, no results");
            return Ok(Vec::new());
        };
        let engine = RatioEngine::new(reference);

        let batch = match self.executor.run(&jobs, |job| self.evaluate_job(&engine, job)) {
            Ok(batch) => batch,
            Err(BatchError::NoJobs) => BatchResult::empty(),
            Err(e) => return Err(e.into()),
        };

        info!(
            computed = batch.jobs_computed,
            absent = batch.jobs_absent,
            success_rate = batch.success_rate(),
            elapsed_ms = batch.total_time_ms,
            "Screened symbol list"
        );
        debug!(absent = ?batch.absent_symbols(), "Symbols without ratios");
        Ok(batch.into_results())
    }

    /// Evaluate one named symbol.
    ///
    /// # Errors
    ///
    /// Returns `ScreenerError::NoResult` if the symbol produces no ratios.
    pub fn run_symbol(&self, symbol: &str) -> Result<RatioResult, ScreenerError> {
        let symbol = normalize_symbol(symbol).unwrap_or_default();
        let candidate = load_window(&series_path(&self.data_dir, &symbol), self.num_days);
        self.evaluate_sole(&symbol, candidate)
    }

    /// Evaluate a series read from `reader` under `label`.
    ///
    /// # Errors
    ///
    /// Returns `ScreenerError::NoResult` if the series produces no ratios.
    pub fn run_reader<R: BufRead>(
        &self,
        label: &str,
        reader: R,
    ) -> Result<RatioResult, ScreenerError> {
        let candidate = load_window_from_reader(reader, self.num_days);
        self.evaluate_sole(label, candidate)
    }

    fn evaluate_job(&self, engine: &RatioEngine, job: &SymbolJob) -> JobOutcome {
        let outcome = load_window(&job.path, self.num_days)
            .ok_or(AbsentReason::MissingData)
            .and_then(|candidate| engine.evaluate(&job.symbol, &candidate));

        match outcome {
            Ok(result) => JobOutcome::Computed(result),
            Err(reason) => JobOutcome::Absent {
                symbol: job.symbol.clone(),
                reason,
            },
        }
    }

    fn evaluate_sole(
        &self,
        symbol: &str,
        candidate: Option<PriceWindow>,
    ) -> Result<RatioResult, ScreenerError> {
        let no_result = |reason| ScreenerError::NoResult {
            symbol: symbol.to_string(),
            reason,
        };

        let reference = self
            .reference_window()
            .ok_or_else(|| no_result(AbsentReason::ReferenceUnavailable))?;
        let candidate = candidate.ok_or_else(|| no_result(AbsentReason::MissingData))?;

        RatioEngine::new(reference)
            .evaluate(symbol, &candidate)
            .map_err(no_result)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    fn write_series(dir: &Path, symbol: &str, start_day: u32, prices: &[f64]) {
        let mut body = String::new();
        for (i, price) in prices.iter().enumerate() {
            writeln!(body, "2024-03-{:02} {price}", start_day as usize + i).unwrap();
        }
        std::fs::write(dir.join(format!("{symbol}.dat")), body).unwrap();
    }

    fn screener(dir: &TempDir, num_days: usize) -> Screener {
        Screener::new(&ScreenerConfig {
            num_days,
            data_dir: dir.path().to_path_buf(),
            ..ScreenerConfig::default()
        })
    }

    fn strings(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  msft \n"), Some("MSFT".to_string()));
        assert_eq!(normalize_symbol("   "), None);
    }

    #[test]
    fn test_reference_symbol_from_path() {
        assert_eq!(reference_symbol("SPY"), "SPY");
        assert_eq!(reference_symbol("data/qqq.dat"), "QQQ");
        assert_eq!(reference_symbol("./spy"), "SPY");
        assert_eq!(reference_symbol("BRK.B"), "BRK.B");
        assert_eq!(reference_symbol(" bf.b "), "BF.B");
        assert_eq!(reference_symbol("brk.b.dat"), "BRK.B");
    }

    #[test]
    fn test_parse_symbol_list_skips_blank_lines() {
        let symbols = parse_symbol_list(Cursor::new("aapl\n\n  ibm  \n\t\nspy\n")).unwrap();
        assert_eq!(symbols, strings(&["AAPL", "IBM", "SPY"]));
    }

    #[test]
    fn test_read_missing_list_is_error() {
        let result = read_symbol_list(Path::new("/nonexistent/momentum.lis"));
        assert!(matches!(result, Err(ScreenerError::ListRead { .. })));
    }

    #[test]
    fn test_run_list_skips_reference_and_missing() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "SPY", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);
        write_series(dir.path(), "AAA", 1, &[50.0, 51.0, 49.0, 53.0, 52.0]);

        let results = screener(&dir, 5)
            .run_list(&strings(&["spy", "aaa", "GONE"]))
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "AAA");
    }

    #[test]
    fn test_run_list_with_dotted_reference() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "BRK.B", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);
        write_series(dir.path(), "BRK", 1, &[80.0, 81.0, 82.0, 83.0, 84.0]);
        write_series(dir.path(), "AAA", 1, &[50.0, 51.0, 49.0, 53.0, 52.0]);

        let screener = Screener::new(&ScreenerConfig {
            reference: "brk.b".to_string(),
            num_days: 5,
            data_dir: dir.path().to_path_buf(),
            ..ScreenerConfig::default()
        });
        assert_eq!(screener.reference(), "BRK.B");

        let results = screener
            .run_list(&strings(&["BRK.B", "AAA", "BRK"]))
            .unwrap();
        let symbols: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();

        assert_eq!(results.len(), 2);
        assert!(symbols.contains(&"AAA"));
        assert!(symbols.contains(&"BRK"));
        assert!(!symbols.contains(&"BRK.B"));
    }

    #[test]
    fn test_run_list_without_reference_is_empty() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "AAA", 1, &[50.0, 51.0, 49.0, 53.0, 52.0]);

        let results = screener(&dir, 5).run_list(&strings(&["AAA"])).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_run_list_empty() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "SPY", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);

        assert!(screener(&dir, 5).run_list(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_run_symbol_missing_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "SPY", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);

        let err = screener(&dir, 5).run_symbol("nope").unwrap_err();
        assert!(matches!(
            err,
            ScreenerError::NoResult {
                reason: AbsentReason::MissingData,
                ..
            }
        ));
    }

    #[test]
    fn test_run_symbol_window_mismatch_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "SPY", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);
        write_series(dir.path(), "LATE", 2, &[50.0, 51.0, 49.0, 53.0, 52.0]);

        let err = screener(&dir, 5).run_symbol("LATE").unwrap_err();
        assert!(matches!(
            err,
            ScreenerError::NoResult {
                reason: AbsentReason::WindowMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_run_reader_uses_label() {
        let dir = TempDir::new().unwrap();
        write_series(dir.path(), "SPY", 1, &[100.0, 102.0, 101.0, 105.0, 103.0]);

        let piped = "2024-03-01 50\n2024-03-02 51\n2024-03-03 49\n2024-03-04 53\n2024-03-05 52\n";
        let result = screener(&dir, 5)
            .run_reader("STDIN", Cursor::new(piped))
            .unwrap();

        assert_eq!(result.symbol, "STDIN");
        assert!((result.cumulative_return - 0.04).abs() < 1e-12);
    }
}
