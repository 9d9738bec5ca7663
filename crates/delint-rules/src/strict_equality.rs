//! Rule forbidding the coercing `==` and `!=` operators.

use delint_core::{Finding, Node, NodeKind, Rule, Severity};

/// Rule code for strict-equality.
pub const CODE: &str = "DL003";

/// Rule name for strict-equality.
pub const NAME: &str = "strict-equality";

/// Message reported for a loose comparison.
pub const MESSAGE: &str = "Use strict equality and inequality operators.";

/// Requires `===` and `!==` instead of `==` and `!=`.
#[derive(Debug, Clone)]
pub struct StrictEquality {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for StrictEquality {
    fn default() -> Self {
        Self::new()
    }
}

impl StrictEquality {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for StrictEquality {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids == and != in favor of === and !=="
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, node: &Node, findings: &mut Vec<Finding>) {
        if let NodeKind::Binary(binary) = &node.kind {
            if binary.operator.token.is_loose_equality() {
                findings.push(Finding::at(node, MESSAGE));
            }
        }
    }
}
