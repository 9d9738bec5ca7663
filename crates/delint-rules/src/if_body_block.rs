//! Rule requiring `if` and `else` branches to use a braced body.
//!
//! An `else` branch that is itself an `if` statement is exempt, so
//! `else if` chains are allowed. Only the branch directly following
//! `else` is looked at; deeper links of a chain are checked when the
//! traversal reaches their own `if` node.

use delint_core::{Finding, Node, NodeKind, Rule, Severity};

/// Rule code for if-body-block.
pub const CODE: &str = "DL002";

/// Rule name for if-body-block.
pub const NAME: &str = "if-body-block";

/// Message reported for an unbraced then-branch.
pub const THEN_MESSAGE: &str = "An if statement's contents should be wrapped in a block body.";

/// Message reported for an unbraced else-branch.
pub const ELSE_MESSAGE: &str = "Else statement's contents should be wrapped in a block body.";

/// Requires `if` and `else` branches to be blocks.
#[derive(Debug, Clone)]
pub struct IfBodyBlock {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for IfBodyBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl IfBodyBlock {
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

impl Rule for IfBodyBlock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires if/else branches to be wrapped in braces"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, node: &Node, findings: &mut Vec<Finding>) {
        let NodeKind::If(stmt) = &node.kind else {
            return;
        };

        if !stmt.then_branch.is_block() {
            findings.push(Finding::at(&stmt.then_branch, THEN_MESSAGE));
        }

        if let Some(else_branch) = &stmt.else_branch {
            if !else_branch.is_block() && !else_branch.is_if() {
                findings.push(Finding::at(else_branch, ELSE_MESSAGE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delint_core::{Diagnostic, Linter};
    use delint_ts::{Dialect, EcmaParser, SourceParser};

    fn check_code(code: &str) -> Vec<Diagnostic> {
        let file = EcmaParser::new(Dialect::TypeScript)
            .parse("test.ts", code)
            .expect("Failed to parse");
        Linter::builder()
            .rule(IfBodyBlock::new())
            .build()
            .check(&file)
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_unbraced_then() {
        let diagnostics = check_code("if (x) f();");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, THEN_MESSAGE);
        // Reported at the branch (from the end of `)`), not at the `if` keyword
        assert_eq!(diagnostics[0].offset, 6);
    }

    #[test]
    fn test_detects_unbraced_else() {
        let diagnostics = check_code("if (x) { f(); } else g();");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, ELSE_MESSAGE);
        assert_eq!(diagnostics[0].offset, 20);
    }

    #[test]
    fn test_then_reported_before_else() {
        let diagnostics = check_code("if (x) f(); else g();");
        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec![THEN_MESSAGE, ELSE_MESSAGE]);
    }

    #[test]
    fn test_allows_else_if_chain() {
        let diagnostics = check_code("if (x) { a(); } else if (y) { b(); } else c();");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, ELSE_MESSAGE);
        assert_eq!(diagnostics[0].offset, 41);
    }

    #[test]
    fn test_allows_braced_branches() {
        assert!(check_code("if (x) { a(); } else { b(); }").is_empty());
        assert!(check_code("if (x) {}").is_empty());
    }

    #[test]
    fn test_nested_if_in_then_branch() {
        // The outer then-branch is a bare `if`, which is not exempt.
        let diagnostics = check_code("if (a) if (b) { c(); }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, THEN_MESSAGE);
        assert_eq!(diagnostics[0].offset, 6);
    }

    #[test]
    fn test_branches_on_their_own_lines() {
        let diagnostics = check_code("if (ready)\n  go();\nelse\n  stop();");
        let lines: Vec<String> = diagnostics.iter().map(|d| d.render("if.ts")).collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        if.ts (1,11): An if statement's contents should be wrapped in a block body.
        if.ts (3,5): Else statement's contents should be wrapped in a block body.
        ");
    }
}
