//! Core types for lint diagnostics and results.

use crate::source::{Position, SourceFile};
use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A rule violation tied to a source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "DL001").
    pub code: String,
    /// Rule name (e.g., "loop-body-block").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Byte offset of the reported node.
    pub offset: usize,
    /// Length of the reported node in bytes.
    pub length: usize,
    /// Line/character of `offset` (0-indexed).
    pub position: Position,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Renders the diagnostic as `<file> (<line>,<character>): <message>`
    /// with 1-indexed line and character.
    #[must_use]
    pub fn render(&self, file_name: &str) -> String {
        format!("{file_name} {}: {}", self.position, self.message)
    }

    /// Builds a rich report pointing into `file`.
    #[must_use]
    pub fn report(&self, file: &SourceFile) -> DiagnosticReport {
        DiagnosticReport {
            message: format!("[{}] {}", self.code, self.message),
            src: NamedSource::new(&file.name, file.text.clone()),
            span: SourceSpan::from((self.offset, self.length)),
            label_message: self.rule.clone(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.position, self.severity, self.code, self.message
        )
    }
}

/// A [`Diagnostic`] rendered through miette, with the offending source
/// snippet attached.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

/// Diagnostics for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File path relative to the analyzed root.
    pub file: PathBuf,
    /// Diagnostics in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of running lint analysis over a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file diagnostics. Files without findings are omitted.
    pub files: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of linting one file.
    pub fn push_file(&mut self, file: PathBuf, diagnostics: Vec<Diagnostic>) {
        self.files_checked += 1;
        if !diagnostics.is_empty() {
            self.files.push(FileReport { file, diagnostics });
        }
    }

    /// Iterates over every diagnostic with its file.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&PathBuf, &Diagnostic)> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics.iter().map(move |d| (&f.file, d)))
    }

    /// Total number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// Returns true if no diagnostics were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any diagnostics meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.diagnostics().any(|(_, d)| d.severity >= severity)
    }

    /// Counts diagnostics by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.diagnostics()
            .fold((0, 0, 0), |(e, w, i), (_, d)| match d.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// One `<file> (<line>,<character>): <message>` line per diagnostic.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.diagnostics()
            .map(|(file, d)| d.render(&file.display().to_string()))
            .collect()
    }

    /// Formats a summary report: every diagnostic followed by totals.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for line in self.render_lines() {
            let _ = writeln!(report, "{line}");
        }
        let (errors, warnings, infos) = self.count_by_severity();
        let _ = write!(
            report,
            "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );
        report
    }
}
