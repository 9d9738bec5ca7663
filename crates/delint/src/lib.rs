//! # delint
//!
//! Structural linter for JavaScript and TypeScript syntax trees.
//!
//! This is the main facade crate that re-exports the core framework, the
//! built-in rules and the Tree-sitter front end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let diagnostics = delint::lint_source("main.ts", "if (a == b) f();")?;
//! for d in &diagnostics {
//!     println!("{}", d.render("main.ts"));
//! }
//! // main.ts (1,12): An if statement's contents should be wrapped in a block body.
//! // main.ts (1,5): Use strict equality and inequality operators.
//! ```
//!
//! ## Directory Analysis
//!
//! ```rust,ignore
//! use delint::Analyzer;
//!
//! let result = Analyzer::builder()
//!     .root("./web")
//!     .build()?
//!     .analyze()?;
//!
//! for line in result.render_lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! Configure via `delint.toml` in the analyzed root.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use delint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use delint_rules::*;
}

/// Tree-sitter front end.
pub mod ts {
    pub use delint_ts::*;
}

mod analyzer;
mod runner;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use runner::{lint_source, load_config, CONFIG_CANDIDATES};
