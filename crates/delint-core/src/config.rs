//! Configuration types for delint.

use crate::rule::Finding;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration, usually read from `delint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold at which a run counts as failed (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Where diagnostics are positioned (default: full start).
    #[serde(default)]
    pub report_anchor: ReportAnchor,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules are enabled unless configured off.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block for a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Effective failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Which offset of a reported node a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportAnchor {
    /// The end of the preceding token, so leading whitespace and comments
    /// belong to the node. The first node of a file starts at 0.
    #[default]
    FullStart,
    /// The node's first token.
    TokenStart,
}

impl ReportAnchor {
    /// Picks the reported offset of `finding`.
    #[must_use]
    pub fn offset(self, finding: &Finding) -> usize {
        match self {
            Self::FullStart => finding.full_start.min(finding.span.start),
            Self::TokenStart => finding.span.start,
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, every file a parser handles).
    #[serde(default)]
    pub include: Vec<String>,

    /// Lint files that contain syntax errors instead of skipping them.
    #[serde(default)]
    pub allow_syntax_errors: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            include: Vec::new(),
            allow_syntax_errors: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
    ]
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.analyzer.allow_syntax_errors);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Error);
        assert_eq!(config.report_anchor, ReportAnchor::FullStart);
        assert!(config.is_rule_enabled("loop-body-block"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "minimal"
fail_on = "warning"
report_anchor = "token-start"

[analyzer]
root = "./web"
exclude = ["**/dist/**"]

[rules.loop-body-block]
enabled = true
severity = "warning"
check_for_of = true

[rules.strict-equality]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("minimal"));
        assert_eq!(config.fail_on(), Severity::Warning);
        assert_eq!(config.report_anchor, ReportAnchor::TokenStart);
        assert_eq!(config.analyzer.root, PathBuf::from("./web"));
        assert_eq!(config.analyzer.exclude, vec!["**/dist/**".to_string()]);
        assert!(config.is_rule_enabled("loop-body-block"));
        assert!(!config.is_rule_enabled("strict-equality"));
        assert_eq!(
            config.rule_severity("loop-body-block"),
            Some(Severity::Warning)
        );

        let rule_config = config.rule("loop-body-block").unwrap();
        assert!(rule_config.get_bool("check_for_of", false));
        assert!(!rule_config.get_bool("missing", false));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("preset = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
