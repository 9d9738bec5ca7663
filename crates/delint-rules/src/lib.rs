//! # delint-rules
//!
//! Built-in structural lint rules for delint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `loop-body-block` | Requires loop bodies to be wrapped in braces |
//! | DL002 | `if-body-block` | Requires if/else branches to be wrapped in braces |
//! | DL003 | `strict-equality` | Forbids `==` and `!=` |
//!
//! Rules are evaluated in the order above; when several rules fire on the
//! same node their diagnostics follow that order.
//!
//! ## Usage
//!
//! ```ignore
//! use delint_core::Linter;
//! use delint_rules::{LoopBodyBlock, StrictEquality};
//!
//! let linter = Linter::builder()
//!     .rule(LoopBodyBlock::new())
//!     .rule(StrictEquality::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod if_body_block;
pub mod loop_body_block;
mod presets;
pub mod strict_equality;

pub use if_body_block::IfBodyBlock;
pub use loop_body_block::LoopBodyBlock;
pub use presets::{all_rules, minimal_rules, recommended_rules, rules_from_config, Preset};
pub use strict_equality::StrictEquality;

/// Re-export core types for convenience.
pub use delint_core::{Rule, Severity};
