//! Symbol universe loading.

use std::path::Path;

use crate::error::FetchError;

/// Symbols from list text: trimmed, upper-cased, blanks skipped, with the
/// reference appended when the list does not already contain it.
#[must_use]
pub fn parse_universe(text: &str, reference: &str) -> Vec<String> {
    let mut universe: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect();

    let reference = reference.trim().to_uppercase();
    if !reference.is_empty() && !universe.contains(&reference) {
        universe.push(reference);
    }
    universe
}

/// Read the universe list file.
///
/// # Errors
///
/// Returns `FetchError::ListRead` if the file cannot be read.
pub fn read_universe(path: &Path, reference: &str) -> Result<Vec<String>, FetchError> {
    let text = std::fs::read_to_string(path).map_err(|source| FetchError::ListRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_universe(&text, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_reference() {
        assert_eq!(
            parse_universe("aapl\n\n msft \n", "spy"),
            vec!["AAPL", "MSFT", "SPY"]
        );
    }

    #[test]
    fn keeps_listed_reference_once() {
        assert_eq!(parse_universe("spy\nibm\n", "SPY"), vec!["SPY", "IBM"]);
    }

    #[test]
    fn empty_list_is_reference_only() {
        assert_eq!(parse_universe("", "SPY"), vec!["SPY"]);
    }

    #[test]
    fn missing_file_is_error() {
        let result = read_universe(Path::new("/nonexistent/momentum.lis"), "SPY");
        assert!(matches!(result, Err(FetchError::ListRead { .. })));
    }
}
