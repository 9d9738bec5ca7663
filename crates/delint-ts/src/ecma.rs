//! JavaScript and TypeScript parsing via Tree-sitter.

use std::path::Path;

use delint_core::SourceFile;
use tracing::debug;
use tree_sitter::{Language, Parser};

use crate::frontend::{ParseError, SourceParser};
use crate::lower::{first_error, lower};

/// Longest snippet quoted in a syntax error.
const SNIPPET_LEN: usize = 20;

/// ECMAScript dialect, selecting the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain JavaScript (including JSX).
    JavaScript,
    /// TypeScript.
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
}

impl Dialect {
    /// Every dialect, in lookup order.
    pub const ALL: [Self; 3] = [Self::JavaScript, Self::TypeScript, Self::Tsx];

    /// Language identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// File extensions handled by this dialect.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => &[".js", ".mjs", ".cjs", ".jsx"],
            Self::TypeScript => &[".ts", ".mts", ".cts"],
            Self::Tsx => &[".tsx"],
        }
    }

    /// Picks the dialect for a path from its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = format!(".{}", path.extension()?.to_str()?);
        Self::ALL
            .into_iter()
            .find(|d| d.extensions().contains(&ext.as_str()))
    }

    fn language(self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parses JavaScript/TypeScript source into `delint-core` trees.
pub struct EcmaParser {
    dialect: Dialect,
    language: Language,
    allow_syntax_errors: bool,
}

impl EcmaParser {
    /// Creates a parser for the given dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            language: dialect.language(),
            allow_syntax_errors: false,
        }
    }

    /// Creates one parser per dialect.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Dialect::ALL.into_iter().map(Self::new).collect()
    }

    /// When set, sources with syntax errors are lowered from the
    /// error-tolerant tree instead of being rejected.
    #[must_use]
    pub fn allow_syntax_errors(mut self, allow: bool) -> Self {
        self.allow_syntax_errors = allow;
        self
    }
}

impl SourceParser for EcmaParser {
    fn language_id(&self) -> &'static str {
        self.dialect.id()
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.dialect.extensions()
    }

    fn parse(&self, file_name: &str, source: &str) -> Result<SourceFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: self.dialect.id(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
            file: file_name.to_string(),
        })?;
        let root = tree.root_node();

        if let Some(error) = first_error(root) {
            if !self.allow_syntax_errors {
                let position = error.start_position();
                let snippet = if error.is_missing() {
                    error.kind().to_string()
                } else {
                    source
                        .get(error.byte_range())
                        .unwrap_or_default()
                        .chars()
                        .take(SNIPPET_LEN)
                        .collect()
                };
                return Err(ParseError::Syntax {
                    file: file_name.to_string(),
                    line: position.row + 1,
                    column: position.column + 1,
                    snippet,
                });
            }
            debug!("{file_name}: linting tree with syntax errors");
        }

        Ok(SourceFile::new(file_name, source, lower(root)))
    }
}
