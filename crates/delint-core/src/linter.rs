//! Tree traversal and rule evaluation.

use crate::config::{Config, ReportAnchor};
use crate::rule::{Finding, Rule, RuleBox};
use crate::source::{LineIndex, MalformedTreeError, SourceFile};
use crate::syntax::Node;
use crate::types::{Diagnostic, Severity};

use std::collections::VecDeque;
use tracing::debug;

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    anchor: Option<ReportAnchor>,
}

impl LinterBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. Rules run in the order they are added.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used to enable rules and override severities.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets where diagnostics are positioned, overriding the config.
    #[must_use]
    pub fn anchor(mut self, anchor: ReportAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Builds the linter, dropping rules the configuration disables.
    #[must_use]
    pub fn build(self) -> Linter {
        let config = self.config.unwrap_or_default();
        let anchor = self.anchor.unwrap_or(config.report_anchor);
        let rules = self
            .rules
            .into_iter()
            .filter_map(|rule| {
                if !config.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule: {}", rule.name());
                    return None;
                }
                let severity = config
                    .rule_severity(rule.name())
                    .unwrap_or_else(|| rule.default_severity());
                Some(ActiveRule { rule, severity })
            })
            .collect();
        Linter { rules, anchor }
    }
}

struct ActiveRule {
    rule: RuleBox,
    severity: Severity,
}

/// Walks syntax trees and reports rule violations.
///
/// A linter holds no per-pass state; the same instance can lint any
/// number of trees, including from several threads at once.
pub struct Linter {
    rules: Vec<ActiveRule>,
    anchor: ReportAnchor,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Names of the active rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// Where diagnostics are positioned.
    #[must_use]
    pub fn anchor(&self) -> ReportAnchor {
        self.anchor
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lazily lints the tree rooted at `root`, whose offsets refer to `text`.
    ///
    /// Diagnostics come out in pre-order: a node's own diagnostics (in rule
    /// order) precede those of its descendants, and siblings are visited
    /// left to right. Calling this again yields the same sequence.
    pub fn lint<'a>(&'a self, root: &'a Node, text: &'a str) -> Diagnostics<'a> {
        Diagnostics {
            rules: &self.rules,
            anchor: self.anchor,
            index: LineIndex::new(text),
            stack: vec![root],
            pending: VecDeque::new(),
            findings: Vec::new(),
        }
    }

    /// Lazily lints a parsed source file.
    pub fn lint_file<'a>(&'a self, file: &'a SourceFile) -> Diagnostics<'a> {
        self.lint(&file.root, &file.text)
    }

    /// Lints a parsed source file and collects every diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] if a reported node's offset does not
    /// fit the file's text.
    pub fn check(&self, file: &SourceFile) -> Result<Vec<Diagnostic>, MalformedTreeError> {
        debug!("Linting: {}", file.name);
        self.lint_file(file).collect()
    }
}

/// Lazy pre-order sequence of diagnostics produced by [`Linter::lint`].
///
/// Ends after the first [`MalformedTreeError`]. Dropping it early has no
/// side effects.
#[derive(Clone)]
pub struct Diagnostics<'a> {
    rules: &'a [ActiveRule],
    anchor: ReportAnchor,
    index: LineIndex<'a>,
    stack: Vec<&'a Node>,
    pending: VecDeque<Result<Diagnostic, MalformedTreeError>>,
    findings: Vec<Finding>,
}

impl<'a> Diagnostics<'a> {
    fn visit(&mut self, node: &'a Node) {
        for active in self.rules {
            self.findings.clear();
            active.rule.check(node, &mut self.findings);
            for finding in self.findings.drain(..) {
                let offset = self.anchor.offset(&finding);
                let diagnostic = self
                    .index
                    .position_of(offset)
                    .map(|position| Diagnostic {
                        code: active.rule.code().to_string(),
                        rule: active.rule.name().to_string(),
                        severity: active.severity,
                        offset,
                        length: finding.span.end.saturating_sub(offset),
                        position,
                        message: finding.message.into_owned(),
                    });
                self.pending.push_back(diagnostic);
            }
        }

        let children = node.children();
        self.stack.extend(children.into_iter().rev());
    }
}

impl Iterator for Diagnostics<'_> {
    type Item = Result<Diagnostic, MalformedTreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                if item.is_err() {
                    self.pending.clear();
                    self.stack.clear();
                }
                return Some(item);
            }
            let node = self.stack.pop()?;
            self.visit(node);
        }
    }
}

impl std::iter::FusedIterator for Diagnostics<'_> {}
