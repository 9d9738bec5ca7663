//! Config discovery and single-source linting.

use delint_core::{Config, ConfigError, Diagnostic, Linter};
use delint_ts::{Dialect, EcmaParser, SourceParser};
use std::path::Path;
use tracing::debug;

use crate::analyzer::AnalyzerError;

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["delint.toml", ".delint.toml"];

/// Loads the first config file found in `dir`.
///
/// Returns `Ok(None)` if no candidate exists.
///
/// # Errors
///
/// Returns an error if a candidate exists but cannot be read or parsed.
pub fn load_config(dir: &Path) -> Result<Option<Config>, ConfigError> {
    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if path.is_file() {
            debug!("Loading config from {}", path.display());
            return Config::from_file(&path).map(Some);
        }
    }
    Ok(None)
}

/// Parses and lints one in-memory source with the recommended rules.
///
/// The dialect is picked from `file_name`'s extension, falling back to
/// TypeScript.
///
/// # Errors
///
/// Returns [`AnalyzerError::Parse`] if the source does not parse and
/// [`AnalyzerError::MalformedTree`] if the tree does not fit the text.
pub fn lint_source(file_name: &str, text: &str) -> Result<Vec<Diagnostic>, AnalyzerError> {
    let dialect = Dialect::from_path(Path::new(file_name)).unwrap_or(Dialect::TypeScript);
    let file = EcmaParser::new(dialect)
        .parse(file_name, text)
        .map_err(|source| AnalyzerError::Parse {
            path: file_name.into(),
            source,
        })?;

    Linter::builder()
        .rules(delint_rules::recommended_rules())
        .build()
        .check(&file)
        .map_err(|source| AnalyzerError::MalformedTree {
            path: file_name.into(),
            source,
        })
}
