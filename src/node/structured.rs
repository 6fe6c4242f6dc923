//! The structured expression tree.
//!
//! Structured trees are precedence-correct: every operator owns exactly the operands it applies
//! to, so they can be rendered into another syntax without any further parsing. They are produced
//! by [upgrading](crate::node::unstructured::Upgradable) a token sequence, or by parsing free text
//! with [crate::text::parse_text].
//!
//! Nodes are stored in an arena owned by [StructuredTree] and refer to each other by [NodeId].
//! Each node remembers its parent, which the renderer uses to decide where brackets are needed.

use core::fmt;

use crate::error::NodeError;
use crate::number::format_number;

/// The identity of a construct, used to look up its precedence and its templates.
pub type ConstructId = i32;

/// The identity carried by leaves (text, numbers and variables).
pub const SENTINEL_ID: ConstructId = -1;

/// The identity of multiplication, which can be rendered implicitly.
pub const MULTIPLY_ID: ConstructId = 0;

/// The construct name carried by every variable.
pub const VARIABLE_NAME: &str = "Variable";

/// The index of a node within its [StructuredTree].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The shape of a node, and the nodes it owns.
#[derive(PartialEq, Debug, Clone)]
pub enum NodeKind {
    /// Literal content which could not be (or was not meant to be) parsed.
    Text(String),

    /// A real number.
    Number(f64),

    /// A single-character variable.
    Variable(char),

    /// An operator with exactly two operands, or a two-slot layout such as a fraction.
    BinaryOp { left: NodeId, right: NodeId },

    /// A chain of the same operator, flattened into two or more operands in reading order.
    NaryOp { children: Vec<NodeId> },

    /// A function of a single argument.
    UnaryFunc { child: NodeId },

    /// Explicit brackets (or something bracket-like, e.g. an absolute value) around a node.
    Grouping { child: NodeId },

    /// A construct with a fixed number of argument slots, e.g. a definite integral.
    NaryFunc { children: Vec<NodeId> },

    /// A grid of nodes, stored row-major.
    Matrix { rows: usize, cols: usize, cells: Vec<NodeId> },
}

impl NodeKind {
    /// Returns the nodes owned by this one, in slot order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Text(_) | NodeKind::Number(_) | NodeKind::Variable(_) => vec![],
            NodeKind::BinaryOp { left, right } => vec![*left, *right],
            NodeKind::UnaryFunc { child } | NodeKind::Grouping { child } => vec![*child],
            NodeKind::NaryOp { children } | NodeKind::NaryFunc { children } => children.clone(),
            NodeKind::Matrix { cells, .. } => cells.clone(),
        }
    }

    /// Returns true for text, numbers and variables.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Text(_) | NodeKind::Number(_) | NodeKind::Variable(_))
    }
}

/// A single node of a [StructuredTree].
#[derive(PartialEq, Debug, Clone)]
pub struct StructuredNode {
    id: ConstructId,
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl StructuredNode {
    pub fn id(&self) -> ConstructId {
        self.id
    }

    /// The construct name, used as the key into template and configuration stores. Empty for text
    /// and numbers.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// A complete expression tree. Every slot of every node is filled.
#[derive(PartialEq, Debug, Clone)]
pub struct StructuredTree {
    nodes: Vec<StructuredNode>,
    root: NodeId,
}

impl StructuredTree {
    /// Starts building a tree bottom-up.
    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Creates a tree consisting of a single text leaf.
    pub fn literal(text: impl Into<String>) -> StructuredTree {
        let mut builder = TreeBuilder::default();
        let root = builder.text(text);
        builder.finish(root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &StructuredNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0].kind.children()
    }

    /// Every node ID in the tree, in allocation order (children before their parents).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the literal text of this tree if it is nothing but a single text leaf.
    pub fn as_literal(&self) -> Option<&str> {
        match self.kind(self.root) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Wraps `target` in a new grouping node, which takes `target`'s place in its parent (or
    /// becomes the new root). Used to force explicit brackets before rendering.
    ///
    /// Returns the ID of the new grouping node.
    pub fn wrap_in_grouping(&mut self, target: NodeId, id: ConstructId, name: impl Into<String>) -> NodeId {
        let group = NodeId(self.nodes.len());
        let old_parent = self.nodes[target.0].parent;

        self.nodes.push(StructuredNode {
            id,
            name: name.into(),
            parent: old_parent,
            kind: NodeKind::Grouping { child: target },
        });
        self.nodes[target.0].parent = Some(group);

        match old_parent {
            Some(parent) => self.nodes[parent.0].kind.replace_child(target, group),
            None => self.root = group,
        }

        group
    }
}

impl NodeKind {
    fn replace_child(&mut self, from: NodeId, to: NodeId) {
        let swap = |slot: &mut NodeId| if *slot == from { *slot = to };
        match self {
            NodeKind::Text(_) | NodeKind::Number(_) | NodeKind::Variable(_) => (),
            NodeKind::BinaryOp { left, right } => {
                swap(left);
                swap(right);
            }
            NodeKind::UnaryFunc { child } | NodeKind::Grouping { child } => swap(child),
            NodeKind::NaryOp { children } | NodeKind::NaryFunc { children } =>
                children.iter_mut().for_each(swap),
            NodeKind::Matrix { cells, .. } => cells.iter_mut().for_each(swap),
        }
    }
}

/// Builds a [StructuredTree] bottom-up. Each method allocates one node, attaches the given
/// children to it, and returns its ID; [TreeBuilder::finish] then hands out the tree.
///
/// A node may only be attached once. Attaching a node which already has a parent is a logic error.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<StructuredNode>,
}

impl TreeBuilder {
    fn push(&mut self, id: ConstructId, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let this = NodeId(self.nodes.len());
        for child in kind.children() {
            debug_assert!(self.nodes[child.0].parent.is_none(), "node attached twice");
            self.nodes[child.0].parent = Some(this);
        }

        self.nodes.push(StructuredNode { id, name: name.into(), parent: None, kind });
        this
    }

    pub fn text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(SENTINEL_ID, "", NodeKind::Text(text.into()))
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.push(SENTINEL_ID, "", NodeKind::Number(value))
    }

    pub fn variable(&mut self, name: char) -> NodeId {
        self.push(SENTINEL_ID, VARIABLE_NAME, NodeKind::Variable(name))
    }

    pub fn binary(&mut self, id: ConstructId, name: &str, left: NodeId, right: NodeId) -> NodeId {
        self.push(id, name, NodeKind::BinaryOp { left, right })
    }

    pub fn nary(&mut self, id: ConstructId, name: &str, children: Vec<NodeId>) -> Result<NodeId, NodeError> {
        if children.len() < 2 {
            return Err(NodeError::SlotCount { name: name.into(), expected: 2, found: children.len() });
        }
        Ok(self.push(id, name, NodeKind::NaryOp { children }))
    }

    pub fn unary(&mut self, id: ConstructId, name: &str, child: NodeId) -> NodeId {
        self.push(id, name, NodeKind::UnaryFunc { child })
    }

    pub fn grouping(&mut self, id: ConstructId, name: &str, child: NodeId) -> NodeId {
        self.push(id, name, NodeKind::Grouping { child })
    }

    pub fn nary_func(&mut self, id: ConstructId, name: &str, children: Vec<NodeId>) -> Result<NodeId, NodeError> {
        if children.len() < 2 {
            return Err(NodeError::SlotCount { name: name.into(), expected: 2, found: children.len() });
        }
        Ok(self.push(id, name, NodeKind::NaryFunc { children }))
    }

    pub fn matrix(&mut self, id: ConstructId, name: &str, rows: usize, cols: usize, cells: Vec<NodeId>) -> Result<NodeId, NodeError> {
        if rows == 0 || cols == 0 || cells.len() != rows * cols {
            return Err(NodeError::SlotCount { name: name.into(), expected: rows * cols, found: cells.len() });
        }
        Ok(self.push(id, name, NodeKind::Matrix { rows, cols, cells }))
    }

    /// Finishes the tree with `root` at the top.
    pub fn finish(self, root: NodeId) -> StructuredTree {
        StructuredTree { nodes: self.nodes, root }
    }
}

impl StructuredTree {
    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter) -> fmt::Result {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Text(text) => write!(f, "{:?}", text),
            NodeKind::Number(n) => write!(f, "{}", format_number(*n, false)),
            NodeKind::Variable(v) => write!(f, "{}", v),

            NodeKind::Matrix { rows, cols, cells } => {
                write!(f, "{}[", node.name)?;
                for r in 0..*rows {
                    if r > 0 { write!(f, ", ")?; }
                    write!(f, "[")?;
                    for c in 0..*cols {
                        if c > 0 { write!(f, ", ")?; }
                        self.fmt_node(cells[r * cols + c], f)?;
                    }
                    write!(f, "]")?;
                }
                write!(f, "]")
            }

            other => {
                write!(f, "{}(", node.name)?;
                for (i, child) in other.children().into_iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    self.fmt_node(child, f)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Writes a compact notation such as `Add(2, Multiply(3, 4))`, useful for logging and tests.
impl fmt::Display for StructuredTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}
