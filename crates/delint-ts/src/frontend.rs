//! Language-agnostic front-end trait and errors.
//!
//! `SourceParser` is the extension point for adding new languages.
//! Implement it to turn source text into a [`SourceFile`] whose tree
//! uses the `delint-core` node kinds.

use delint_core::SourceFile;
use thiserror::Error;

/// Errors raised while turning source text into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree at all.
    #[error("{file}: parser produced no tree")]
    NoTree {
        /// File being parsed.
        file: String,
    },

    /// The source contains a syntax error.
    #[error("{file} ({line},{column}): syntax error near `{snippet}`")]
    Syntax {
        /// File being parsed.
        file: String,
        /// Line number (1-indexed).
        line: usize,
        /// Column (1-indexed byte column).
        column: usize,
        /// Source text of the offending node, truncated.
        snippet: String,
    },
}

/// Trait for language-specific parsing into a `delint-core` tree.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".ts", ".mts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a source file named `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the source cannot be parsed.
    fn parse(&self, file_name: &str, source: &str) -> Result<SourceFile, ParseError>;

    /// Returns true if this parser handles files with the given name.
    fn handles(&self, file_name: &str) -> bool {
        self.extensions().iter().any(|ext| file_name.ends_with(ext))
    }
}
