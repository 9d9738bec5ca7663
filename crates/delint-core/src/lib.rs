//! # delint-core
//!
//! Core framework for structural linting of syntax trees.
//!
//! This crate is independent of any particular parser. It provides:
//!
//! - [`Node`] and friends, an immutable tree with a closed set of kinds
//! - [`Rule`] trait for per-node rules
//! - [`Linter`] for lazy pre-order traversal producing [`Diagnostic`]s
//! - [`LineIndex`] for offset to line/character conversion
//! - [`Config`] for TOML-based rule selection
//!
//! ## Example
//!
//! ```ignore
//! use delint_core::{Linter, SourceFile};
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! for diagnostic in linter.lint_file(&file) {
//!     println!("{}", diagnostic?.render(&file.name));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod linter;
mod rule;
mod source;
mod syntax;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError, ReportAnchor, RuleConfig};
pub use linter::{Diagnostics, Linter, LinterBuilder};
pub use rule::{Finding, Rule, RuleBox};
pub use source::{LineIndex, MalformedTreeError, Position, SourceFile};
pub use syntax::{
    Binary, BinaryOperator, Block, If, Loop, LoopKind, Node, NodeKind, NodeTag, Operator, Other,
    Span,
};
pub use types::{Diagnostic, DiagnosticReport, FileReport, LintResult, Severity};
