//! File discovery and aggregate linting over a directory tree.

use delint_core::{Config, ConfigError, LintResult, Linter, MalformedTreeError, RuleBox};
use delint_ts::{EcmaParser, ParseError, SourceParser};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::runner::load_config;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be parsed.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// A tree did not fit its source text.
    #[error("Malformed tree for {path}: {source}")]
    MalformedTree {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying position error.
        source: MalformedTreeError,
    },

    /// A source file is not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    Encoding {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule. Without explicit rules the configured preset is used.
    #[must_use]
    pub fn rule<R: delint_core::Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a source parser. Without explicit parsers every ECMAScript
    /// dialect is handled.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds an include glob pattern, matched against root-relative paths.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration. Without one, `delint.toml` is looked up
    /// in the root directory.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined, a
    /// discovered config file is invalid, or a glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let dir = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
                load_config(&dir)?.unwrap_or_default()
            }
        };

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        for pattern in exclude_patterns.iter().chain(&include_patterns) {
            glob::Pattern::new(pattern)?;
        }

        let rules = if self.rules.is_empty() {
            delint_rules::rules_from_config(&config)
        } else {
            self.rules
        };

        let parsers = if self.parsers.is_empty() {
            EcmaParser::all()
                .into_iter()
                .map(|p| -> Box<dyn SourceParser> {
                    Box::new(p.allow_syntax_errors(config.analyzer.allow_syntax_errors))
                })
                .collect()
        } else {
            self.parsers
        };

        let linter = Linter::builder().rules(rules).config(config.clone()).build();

        Ok(Analyzer {
            root,
            linter,
            parsers,
            exclude_patterns,
            include_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Lints every supported source file below a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    linter: Linter,
    parsers: Vec<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the linter used for every file.
    #[must_use]
    pub fn linter(&self) -> &Linter {
        &self.linter
    }

    /// Analyzes all files and returns the results, ordered by path.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, a tree does
    /// not fit its source, or a file fails to parse while
    /// `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for (path, parser) in &files {
            let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
            debug!("Analyzing: {}", relative.display());

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    warn!("Skipping {}: not valid UTF-8", relative.display());
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Encoding { path: relative });
                    }
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let file = match parser.parse(&relative.display().to_string(), &content) {
                Ok(file) => file,
                Err(source) => {
                    warn!("Failed to parse {}: {}", relative.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse {
                            path: relative,
                            source,
                        });
                    }
                    continue;
                }
            };

            let diagnostics = self.linter.check(&file).map_err(|source| {
                AnalyzerError::MalformedTree {
                    path: relative.clone(),
                    source,
                }
            })?;
            result.push_file(relative, diagnostics);
        }

        // Files only; diagnostics within a file stay in traversal order
        result.files.sort_by(|a, b| a.file.cmp(&b.file));

        info!(
            "Analysis complete: {} diagnostics in {} files",
            result.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Discovers every file some parser handles, paired with that parser.
    fn discover_files(&self) -> Result<Vec<(PathBuf, &dyn SourceParser)>, AnalyzerError> {
        let pattern = format!("{}/**/*", glob::Pattern::escape(&self.root.to_string_lossy()));
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;
            if !path.is_file() {
                continue;
            }

            let name = path.to_string_lossy();
            let Some(parser) = self.parsers.iter().find(|p| p.handles(&name)) else {
                continue;
            };

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push((path, parser.as_ref()));
        }

        Ok(files)
    }

    /// Checks if a path should be excluded. Patterns match whole
    /// root-relative paths.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.to_string_lossy();
        let matches =
            |pattern: &String| glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&relative));

        if self.exclude_patterns.iter().any(matches) {
            return true;
        }
        !self.include_patterns.is_empty() && !self.include_patterns.iter().any(matches)
    }
}
