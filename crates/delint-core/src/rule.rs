//! Rule trait for defining lint rules.

use crate::syntax::{Node, Span};
use crate::types::Severity;
use std::borrow::Cow;

/// A single finding produced by a rule at one node.
///
/// The linter turns findings into [`Diagnostic`](crate::Diagnostic)s by
/// resolving the reported offset (see [`ReportAnchor`](crate::ReportAnchor))
/// to a line/character position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Range to report. Usually the inspected node or one of its children.
    pub span: Span,
    /// Start of the reported node including its leading trivia.
    pub full_start: usize,
    /// Human-readable message.
    pub message: Cow<'static, str>,
}

impl Finding {
    /// Creates a finding reported at `node`.
    #[must_use]
    pub fn at(node: &Node, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            span: node.span,
            full_start: node.full_start,
            message: message.into(),
        }
    }
}

/// A per-node lint rule.
///
/// The linter calls [`Rule::check`] once for every node of the tree, in
/// pre-order. Rules only inspect the node they are given (and may look at
/// its direct payload); descending into children is the linter's job.
///
/// # Example
///
/// ```
/// use delint_core::{Finding, Node, NodeKind, Rule};
///
/// pub struct NoEmptyBlocks;
///
/// impl Rule for NoEmptyBlocks {
///     fn name(&self) -> &'static str { "no-empty-blocks" }
///     fn code(&self) -> &'static str { "DL100" }
///
///     fn check(&self, node: &Node, findings: &mut Vec<Finding>) {
///         if let NodeKind::Block(block) = &node.kind {
///             if block.statements.is_empty() {
///                 findings.push(Finding::at(node, "Empty block."));
///             }
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "loop-body-block").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Inspects one node and appends a [`Finding`] per violation.
    ///
    /// Findings pushed by one call keep their order in the output.
    fn check(&self, node: &Node, findings: &mut Vec<Finding>);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
