//! Postfix (reverse Polish) form of an expression, and its reconstruction into a tree.
//!
//! Both the token builder and the text parser reduce their input to a [Postfix] sequence, which
//! makes precedence explicit. [assemble] then pops items off the end of the sequence to rebuild a
//! [StructuredTree], flattening chains of the same n-ary operator as it goes.
//!
//! Constructs owning regions carry each region as its own nested postfix sequence, already in slot
//! order, so no region ever bleeds into its neighbours.

use crate::error::NodeError;
use crate::node::structured::{ConstructId, NodeId, StructuredTree, TreeBuilder};

/// A resolved construct: what the tree node will be called and keyed on.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ConstructRef {
    pub id: ConstructId,
    pub name: String,
}

impl ConstructRef {
    pub fn new(id: ConstructId, name: impl Into<String>) -> Self {
        ConstructRef { id, name: name.into() }
    }
}

/// How a construct with regions turns into a node.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum RegionShape {
    Unary,
    Grouping,
    /// Two regions, left then right.
    Binary,
    NaryFunction,
    Matrix { rows: usize, cols: usize },
}

/// One item of a postfix sequence.
#[derive(PartialEq, Debug, Clone)]
pub enum Postfix {
    Text(String),
    Number(f64),
    Variable(char),

    /// An operator applying to the two operands before it.
    Operator { construct: ConstructRef, nary: bool },

    /// A construct which owns its operands, each as a separate sequence, in slot order.
    Construct { construct: ConstructRef, shape: RegionShape, regions: Vec<Vec<Postfix>> },
}

/// Rebuilds a tree from a complete postfix sequence.
pub fn assemble(items: Vec<Postfix>, max_depth: usize) -> Result<StructuredTree, NodeError> {
    let mut assembler = Assembler { tree: TreeBuilder::default(), max_depth };
    let root = assembler.assemble_sequence(items, 0)?;
    Ok(assembler.tree.finish(root))
}

struct Assembler {
    tree: TreeBuilder,
    max_depth: usize,
}

impl Assembler {
    fn assemble_sequence(&mut self, mut items: Vec<Postfix>, depth: usize) -> Result<NodeId, NodeError> {
        let root = self.pop_node(&mut items, depth)?;

        // Anything left over means two operands were never joined by an operator
        if !items.is_empty() {
            return Err(NodeError::AdjacentOperands { position: items.len() - 1 });
        }

        Ok(root)
    }

    fn pop_node(&mut self, items: &mut Vec<Postfix>, depth: usize) -> Result<NodeId, NodeError> {
        if depth > self.max_depth {
            return Err(NodeError::TooDeep { limit: self.max_depth });
        }

        let position = items.len().saturating_sub(1);
        let item = items.pop().ok_or(NodeError::EmptyExpression { position })?;

        match item {
            Postfix::Text(text) => Ok(self.tree.text(text)),
            Postfix::Number(value) => Ok(self.tree.number(value)),
            Postfix::Variable(name) => Ok(self.tree.variable(name)),

            Postfix::Operator { construct, nary: false } => {
                let right = self.pop_operand(items, position, depth)?;
                let left = self.pop_operand(items, position, depth)?;
                Ok(self.tree.binary(construct.id, &construct.name, left, right))
            }

            Postfix::Operator { construct, nary: true } => {
                let mut children = self.gather_nary(items, construct.id, position, depth)?;
                children.reverse();
                self.tree.nary(construct.id, &construct.name, children)
            }

            Postfix::Construct { construct, shape, regions } => {
                let mut slots = Vec::with_capacity(regions.len());
                for region in regions {
                    slots.push(self.assemble_sequence(region, depth + 1)?);
                }
                self.construct_node(construct, shape, slots)
            }
        }
    }

    /// Pops the operand of an operator at `position`.
    fn pop_operand(&mut self, items: &mut Vec<Postfix>, position: usize, depth: usize) -> Result<NodeId, NodeError> {
        if items.is_empty() {
            return Err(NodeError::UnbalancedOperand { position });
        }
        self.pop_node(items, depth + 1)
    }

    /// Pops the operands of an n-ary operator with identity `id`, right to left. Where an operand is
    /// itself the same operator, its operands are absorbed in its place, at the same depth.
    fn gather_nary(&mut self, items: &mut Vec<Postfix>, id: ConstructId, mut position: usize, depth: usize) -> Result<Vec<NodeId>, NodeError> {
        let mut children = vec![];
        let mut pending = 2;

        while pending > 0 {
            match items.last() {
                Some(Postfix::Operator { construct, nary: true }) if construct.id == id => {
                    position = items.len() - 1;
                    items.pop();
                    pending += 1;
                }
                _ => {
                    children.push(self.pop_operand(items, position, depth)?);
                    pending -= 1;
                }
            }
        }

        Ok(children)
    }

    fn construct_node(&mut self, construct: ConstructRef, shape: RegionShape, slots: Vec<NodeId>) -> Result<NodeId, NodeError> {
        let ConstructRef { id, name } = construct;
        let single = |slots: &[NodeId]| match slots {
            [only] => Ok(*only),
            _ => Err(NodeError::SlotCount { name: name.clone(), expected: 1, found: slots.len() }),
        };

        match shape {
            RegionShape::Unary => {
                let child = single(&slots)?;
                Ok(self.tree.unary(id, &name, child))
            }
            RegionShape::Grouping => {
                let child = single(&slots)?;
                Ok(self.tree.grouping(id, &name, child))
            }
            RegionShape::Binary => match slots[..] {
                [left, right] => Ok(self.tree.binary(id, &name, left, right)),
                _ => Err(NodeError::SlotCount { name, expected: 2, found: slots.len() }),
            },
            RegionShape::NaryFunction => self.tree.nary_func(id, &name, slots),
            RegionShape::Matrix { rows, cols } => self.tree.matrix(id, &name, rows, cols, slots),
        }
    }
}
