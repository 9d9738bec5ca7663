//! Rule requiring looping statements to use a braced body.
//!
//! # Configuration
//!
//! - `check_for_of`: Also check `for ... of` loops (default: false)

use delint_core::{Finding, LoopKind, Node, NodeKind, Rule, Severity};

/// Rule code for loop-body-block.
pub const CODE: &str = "DL001";

/// Rule name for loop-body-block.
pub const NAME: &str = "loop-body-block";

/// Message reported for an unbraced loop body.
pub const MESSAGE: &str = "A looping statement's contents should be wrapped in a block body.";

/// Requires `for`, `for ... in`, `while` and `do ... while` bodies to be blocks.
#[derive(Debug, Clone)]
pub struct LoopBodyBlock {
    /// Also check `for ... of` loops.
    pub check_for_of: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LoopBodyBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBodyBlock {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            check_for_of: false,
            severity: Severity::Error,
        }
    }

    /// Sets whether `for ... of` loops are checked.
    #[must_use]
    pub fn check_for_of(mut self, check: bool) -> Self {
        self.check_for_of = check;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn applies_to(&self, kind: LoopKind) -> bool {
        match kind {
            LoopKind::For | LoopKind::ForIn | LoopKind::While | LoopKind::DoWhile => true,
            LoopKind::ForOf => self.check_for_of,
        }
    }
}

impl Rule for LoopBodyBlock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires loop bodies to be wrapped in braces"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, node: &Node, findings: &mut Vec<Finding>) {
        let NodeKind::Loop(looping) = &node.kind else {
            return;
        };
        if self.applies_to(looping.kind) && !looping.body.is_block() {
            findings.push(Finding::at(node, MESSAGE));
        }
    }
}
