//! Immutable syntax tree consumed by the linter.
//!
//! Trees are produced by a front end (see `delint-ts`) and are read-only
//! afterwards. Node kinds form a closed set so rules can `match` on them
//! exhaustively; everything the rules do not care about is [`NodeKind::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (0-based, inclusive).
    pub start: usize,
    /// End offset (0-based, exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Which looping construct a [`Loop`] node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopKind {
    /// `for (init; cond; step) body`
    For,
    /// `for (key in object) body`
    ForIn,
    /// `for (item of iterable) body`
    ForOf,
    /// `while (cond) body`
    While,
    /// `do body while (cond)`
    DoWhile,
}

/// Binary operator token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// `==`
    LooseEq,
    /// `!=`
    LooseNe,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNe,
    /// Any other operator, kept verbatim.
    Other(String),
}

impl BinaryOperator {
    /// Classifies an operator token by its source text.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "==" => Self::LooseEq,
            "!=" => Self::LooseNe,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNe,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Source text of the operator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LooseEq => "==",
            Self::LooseNe => "!=",
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
            Self::Other(token) => token,
        }
    }

    /// Returns true for `==` and `!=`, which coerce their operands.
    #[must_use]
    pub fn is_loose_equality(&self) -> bool {
        matches!(self, Self::LooseEq | Self::LooseNe)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator token of a binary expression together with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// The operator.
    pub token: BinaryOperator,
    /// Where the token appears in the source.
    pub span: Span,
}

/// A looping statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    /// Which loop construct this is.
    pub kind: LoopKind,
    /// Header parts (initializer, condition, update, iterated expression)
    /// in source order.
    pub clauses: Vec<Node>,
    /// The statement executed on each iteration.
    pub body: Box<Node>,
}

/// An `if` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct If {
    /// The tested expression.
    pub condition: Box<Node>,
    /// Statement run when the condition holds.
    pub then_branch: Box<Node>,
    /// Statement following `else`, if any. An `else if` chain appears
    /// here as a nested [`NodeKind::If`].
    pub else_branch: Option<Box<Node>>,
}

/// A binary expression such as `a == b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    /// Left operand.
    pub left: Box<Node>,
    /// Operator token.
    pub operator: Operator,
    /// Right operand.
    pub right: Box<Node>,
}

/// A braced statement block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order.
    pub statements: Vec<Node>,
}

/// Any syntactic category the rules do not inspect.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Other {
    /// The parser's name for this category (e.g. `expression_statement`).
    pub label: String,
    /// Children in source order.
    pub children: Vec<Node>,
}

/// Kind-specific payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Looping statement.
    Loop(Loop),
    /// `if` statement.
    If(If),
    /// Binary expression.
    Binary(Binary),
    /// Braced block.
    Block(Block),
    /// Everything else.
    Other(Other),
}

/// Payload-free discriminant of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    /// [`NodeKind::Loop`]
    Loop,
    /// [`NodeKind::If`]
    If,
    /// [`NodeKind::Binary`]
    Binary,
    /// [`NodeKind::Block`]
    Block,
    /// [`NodeKind::Other`]
    Other,
}

impl NodeKind {
    /// Moves every direct child out, leaving empty placeholders behind.
    fn take_children(&mut self) -> Vec<Node> {
        match self {
            Self::Loop(l) => {
                let mut out = std::mem::take(&mut l.clauses);
                out.push(take_boxed(&mut l.body));
                out
            }
            Self::If(i) => {
                let mut out = vec![take_boxed(&mut i.condition), take_boxed(&mut i.then_branch)];
                out.extend(i.else_branch.take().map(|node| *node));
                out
            }
            Self::Binary(b) => vec![take_boxed(&mut b.left), take_boxed(&mut b.right)],
            Self::Block(b) => std::mem::take(&mut b.statements),
            Self::Other(o) => std::mem::take(&mut o.children),
        }
    }
}

fn take_boxed(slot: &mut Node) -> Node {
    std::mem::replace(slot, Node::placeholder())
}

/// One element of a syntax tree.
///
/// A node exclusively owns its children; the tree is finite and acyclic
/// by construction. Dropping a node does not recurse, so trees of any
/// depth can be released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Source range covered by this node, from its first token.
    pub span: Span,
    /// Offset where the node starts once leading trivia (whitespace,
    /// comments) is included: the end of the preceding token, or 0.
    /// Never greater than `span.start`.
    #[serde(default)]
    pub full_start: usize,
    /// Kind and kind-specific children.
    pub kind: NodeKind,
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.kind.take_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.kind.take_children());
        }
    }
}

impl Node {
    /// Creates a node from a span and payload. The full start defaults to
    /// the span start.
    #[must_use]
    pub fn new(span: Span, kind: NodeKind) -> Self {
        Self {
            span,
            full_start: span.start,
            kind,
        }
    }

    fn placeholder() -> Self {
        Self::new(
            Span::default(),
            NodeKind::Other(Other {
                label: String::new(),
                children: Vec::new(),
            }),
        )
    }

    /// Sets the offset at which leading trivia begins.
    #[must_use]
    pub fn with_full_start(mut self, full_start: usize) -> Self {
        self.full_start = full_start;
        self
    }

    /// Creates a loop node.
    #[must_use]
    pub fn looping(span: Span, kind: LoopKind, clauses: Vec<Node>, body: Node) -> Self {
        Self::new(
            span,
            NodeKind::Loop(Loop {
                kind,
                clauses,
                body: Box::new(body),
            }),
        )
    }

    /// Creates an `if` node.
    #[must_use]
    pub fn if_statement(
        span: Span,
        condition: Node,
        then_branch: Node,
        else_branch: Option<Node>,
    ) -> Self {
        Self::new(
            span,
            NodeKind::If(If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            }),
        )
    }

    /// Creates a binary expression node.
    #[must_use]
    pub fn binary(span: Span, left: Node, operator: Operator, right: Node) -> Self {
        Self::new(
            span,
            NodeKind::Binary(Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            }),
        )
    }

    /// Creates a block node.
    #[must_use]
    pub fn block(span: Span, statements: Vec<Node>) -> Self {
        Self::new(span, NodeKind::Block(Block { statements }))
    }

    /// Creates a node of an uninspected category.
    #[must_use]
    pub fn other(span: Span, label: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(
            span,
            NodeKind::Other(Other {
                label: label.into(),
                children,
            }),
        )
    }

    /// Returns the payload-free kind tag.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self.kind {
            NodeKind::Loop(_) => NodeTag::Loop,
            NodeKind::If(_) => NodeTag::If,
            NodeKind::Binary(_) => NodeTag::Binary,
            NodeKind::Block(_) => NodeTag::Block,
            NodeKind::Other(_) => NodeTag::Other,
        }
    }

    /// Returns true if this node is a braced block.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block(_))
    }

    /// Returns true if this node is an `if` statement.
    #[must_use]
    pub fn is_if(&self) -> bool {
        matches!(self.kind, NodeKind::If(_))
    }

    /// Returns the direct children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Loop(l) if l.kind == LoopKind::DoWhile => std::iter::once(&*l.body)
                .chain(l.clauses.iter())
                .collect(),
            NodeKind::Loop(l) => l
                .clauses
                .iter()
                .chain(std::iter::once(&*l.body))
                .collect(),
            NodeKind::If(i) => {
                let mut out = vec![&*i.condition, &*i.then_branch];
                out.extend(i.else_branch.as_deref());
                out
            }
            NodeKind::Binary(b) => vec![&*b.left, &*b.right],
            NodeKind::Block(b) => b.statements.iter().collect(),
            NodeKind::Other(o) => o.children.iter().collect(),
        }
    }

    /// Checks the structural invariants: every span is ordered, every
    /// child lies within its parent, and siblings do not overlap and
    /// appear left to right. Full starts never pass the span start, never
    /// precede the parent's full start and never reach back into the
    /// previous sibling.
    ///
    /// The linter assumes these hold and never calls this itself.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.span.end < node.span.start || node.full_start > node.span.start {
                return false;
            }
            if let NodeKind::Binary(b) = &node.kind {
                if !node.span.contains(b.operator.span) {
                    return false;
                }
            }
            let children = node.children();
            let mut cursor = node.span.start;
            let mut full_cursor = node.full_start;
            for child in &children {
                if !node.span.contains(child.span)
                    || child.span.start < cursor
                    || child.full_start < full_cursor
                {
                    return false;
                }
                cursor = child.span.end;
                full_cursor = child.span.end;
            }
            stack.extend(children);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(start: usize, end: usize) -> Node {
        Node::other(Span::new(start, end), "identifier", vec![])
    }

    #[test]
    fn operator_classification() {
        assert!(BinaryOperator::from_token("==").is_loose_equality());
        assert!(BinaryOperator::from_token("!=").is_loose_equality());
        assert!(!BinaryOperator::from_token("===").is_loose_equality());
        assert!(!BinaryOperator::from_token("<").is_loose_equality());
        assert_eq!(BinaryOperator::from_token("<=").as_str(), "<=");
    }

    #[test]
    fn do_while_children_put_body_first() {
        // do x; while (y)
        let node = Node::looping(
            Span::new(0, 15),
            LoopKind::DoWhile,
            vec![leaf(13, 14)],
            leaf(3, 5),
        );
        let starts: Vec<usize> = node.children().iter().map(|c| c.span.start).collect();
        assert_eq!(starts, vec![3, 13]);
        assert!(node.is_well_formed());
    }

    #[test]
    fn if_children_include_else() {
        let node = Node::if_statement(
            Span::new(0, 20),
            leaf(4, 5),
            leaf(7, 10),
            Some(leaf(16, 20)),
        );
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.tag(), NodeTag::If);
    }

    #[test]
    fn detects_child_escaping_parent() {
        let node = Node::block(Span::new(0, 5), vec![leaf(2, 9)]);
        assert!(!node.is_well_formed());
    }

    #[test]
    fn detects_full_start_past_token_start() {
        let node = Node::block(Span::new(0, 10), vec![leaf(3, 5).with_full_start(4)]);
        assert!(!node.is_well_formed());

        let node = Node::block(Span::new(0, 10), vec![leaf(3, 5).with_full_start(1)]);
        assert!(node.is_well_formed());
    }

    #[test]
    fn detects_full_start_overlapping_previous_sibling() {
        let node = Node::block(
            Span::new(0, 10),
            vec![leaf(1, 4), leaf(6, 8).with_full_start(3)],
        );
        assert!(!node.is_well_formed());
    }

    #[test]
    fn dropping_a_very_deep_tree_does_not_recurse() {
        let depth = 200_000;
        let mut node = leaf(depth, depth + 1);
        for level in 1..=depth {
            node = if level % 2 == 0 {
                Node::block(Span::new(depth - level, depth + 1 + level), vec![node])
            } else {
                Node::binary(
                    Span::new(depth - level, depth + 1 + level),
                    node,
                    Operator {
                        token: BinaryOperator::LooseEq,
                        span: Span::new(depth + level, depth + level + 1),
                    },
                    leaf(depth + level, depth + level + 1),
                )
            };
        }
        drop(node);
    }

    #[test]
    fn detects_out_of_order_siblings() {
        let node = Node::block(Span::new(0, 10), vec![leaf(5, 7), leaf(1, 3)]);
        assert!(!node.is_well_formed());
    }
}
