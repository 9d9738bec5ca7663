//! Lowering of tree-sitter concrete syntax trees into `delint-core` nodes.
//!
//! The JavaScript and TypeScript grammars share node names for every
//! construct the rules inspect, so one lowering serves all dialects.
//! Anonymous tokens and extras (comments) are dropped; every other named
//! node the rules do not inspect becomes [`NodeKind::Other`](delint_core::NodeKind).
//!
//! The walk uses a [`TreeCursor`](tree_sitter::TreeCursor) and an
//! explicit frame stack, so input nesting depth is bounded by memory
//! rather than by the thread's stack. Along the way it records each
//! node's full start: the end of the last non-extra token before it.

use delint_core::{BinaryOperator, LoopKind, Node, Operator, Span};
use tracing::trace;
use tree_sitter::Node as TsNode;

/// A lowered child together with the grammar field it was found under.
type Child = (Option<&'static str>, Node);

/// A CST node whose children are still being lowered.
struct Frame<'t> {
    node: TsNode<'t>,
    field: Option<&'static str>,
    full_start: usize,
    children: Vec<Child>,
}

/// Lowers `root` and its whole subtree.
pub(crate) fn lower(root: TsNode<'_>) -> Node {
    let mut cursor = root.walk();
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut finished: Vec<Child> = Vec::new();
    let mut token_end = 0;

    'walk: loop {
        let node = cursor.node();
        let mut opened = false;

        if !node.is_extra() {
            let has_children = node.child_count() > 0;
            if node.is_named() || has_children {
                stack.push(Frame {
                    node,
                    field: cursor.field_name(),
                    full_start: token_end.min(node.start_byte()),
                    children: Vec::new(),
                });
                opened = true;
            }
            if !has_children {
                token_end = token_end.max(node.end_byte());
            } else if cursor.goto_first_child() {
                continue;
            }
        }

        // `node` is done; close frames until a next sibling turns up
        loop {
            if opened {
                let Some(frame) = stack.pop() else {
                    break 'walk;
                };
                let out = match stack.last_mut() {
                    Some(parent) => &mut parent.children,
                    None => &mut finished,
                };
                frame.close(out);
                if stack.is_empty() {
                    break 'walk;
                }
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
            opened = true;
        }
    }

    match finished.pop() {
        Some((_, node)) => node,
        None => Node::other(span_of(root), root.kind(), Vec::new()),
    }
}

fn span_of(node: TsNode<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

impl Frame<'_> {
    /// Builds the lowered node and appends it to `out`.
    fn close(mut self, out: &mut Vec<Child>) {
        let span = span_of(self.node);
        let kind = self.node.kind();

        if !self.node.is_named() {
            // anonymous wrapper: its children belong to the parent
            out.append(&mut self.children);
            return;
        }
        if kind == "else_clause" {
            // stands in for the statement it wraps
            if let Some((_, statement)) = self.children.into_iter().next() {
                out.push((self.field, statement));
            }
            return;
        }

        let lowered = match kind {
            "for_statement" | "for_in_statement" | "while_statement" | "do_statement" => {
                self.lower_loop(span)
            }
            "if_statement" => self.lower_if(span),
            "binary_expression" => self.lower_binary(span),
            "statement_block" => Some(Node::block(span, self.take_all())),
            _ => {
                let node = Node::other(span, kind, self.take_all());
                out.push((self.field, node.with_full_start(self.full_start)));
                return;
            }
        };

        let node = lowered.unwrap_or_else(|| {
            trace!(kind, "incomplete node lowered as other");
            Node::other(span, kind, self.take_all())
        });
        out.push((self.field, node.with_full_start(self.full_start)));
    }

    fn take_all(&mut self) -> Vec<Node> {
        self.children.drain(..).map(|(_, node)| node).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.children.iter().any(|(field, _)| *field == Some(name))
    }

    fn take_field(&mut self, name: &str) -> Option<Node> {
        let index = self
            .children
            .iter()
            .position(|(field, _)| *field == Some(name))?;
        Some(self.children.remove(index).1)
    }

    fn lower_loop(&mut self, span: Span) -> Option<Node> {
        let kind = loop_kind(self.node)?;
        let body = self.take_field("body")?;
        Some(Node::looping(span, kind, self.take_all(), body))
    }

    fn lower_if(&mut self, span: Span) -> Option<Node> {
        if !self.has_field("condition") || !self.has_field("consequence") {
            return None;
        }
        let condition = self.take_field("condition")?;
        let consequence = self.take_field("consequence")?;
        let alternative = self.take_field("alternative");
        Some(Node::if_statement(span, condition, consequence, alternative))
    }

    fn lower_binary(&mut self, span: Span) -> Option<Node> {
        let operator = self.node.child_by_field_name("operator")?;
        if !self.has_field("left") || !self.has_field("right") {
            return None;
        }
        let left = self.take_field("left")?;
        let right = self.take_field("right")?;
        Some(Node::binary(
            span,
            left,
            Operator {
                token: BinaryOperator::from_token(operator.kind()),
                span: span_of(operator),
            },
            right,
        ))
    }
}

fn loop_kind(node: TsNode<'_>) -> Option<LoopKind> {
    match node.kind() {
        "for_statement" => Some(LoopKind::For),
        "while_statement" => Some(LoopKind::While),
        "do_statement" => Some(LoopKind::DoWhile),
        "for_in_statement" => {
            let is_of = node
                .child_by_field_name("operator")
                .is_some_and(|op| op.kind() == "of");
            Some(if is_of { LoopKind::ForOf } else { LoopKind::ForIn })
        }
        _ => None,
    }
}

/// Finds the first ERROR or MISSING node in document order.
pub(crate) fn first_error(root: TsNode<'_>) -> Option<TsNode<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return Some(root);
            }
        }
    }
}
