//! Converts an unstructured token sequence into postfix form with a shunting-yard pass, then hands
//! it to [postfix::assemble](crate::node::postfix::assemble). Used to implement
//! [Upgradable](crate::node::unstructured::Upgradable).

use log::{debug, trace, warn};

use crate::config::{ConstructDef, ConstructTable, Shape};
use crate::error::{NodeError, ParseError};
use crate::node::postfix::{self, ConstructRef, Postfix, RegionShape};
use crate::node::structured::StructuredTree;
use crate::node::unstructured::{BuildSettings, UnstructuredNode, UnstructuredNodeList};
use crate::precedence::Precedence;
use crate::text;

/// What the scan saw last, which decides whether an operand or an operator may come next.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
enum Last {
    Nothing,
    Operand,
    Operator,
}

pub struct Builder<'a> {
    constructs: &'a ConstructTable,
    settings: &'a BuildSettings,
}

impl<'a> Builder<'a> {
    pub fn new(constructs: &'a ConstructTable, settings: &'a BuildSettings) -> Self {
        Builder { constructs, settings }
    }

    pub fn build(&self, list: &UnstructuredNodeList) -> Result<StructuredTree, NodeError> {
        let postfix = self.to_postfix(list, 0)?;
        trace!("postfix form: {:?}", postfix);

        let tree = postfix::assemble(postfix, self.settings.max_depth)?;
        debug!("upgraded {} tokens into {}", list.len(), tree);
        Ok(tree)
    }

    fn check_depth(&self, depth: usize) -> Result<(), NodeError> {
        if depth > self.settings.max_depth {
            Err(NodeError::TooDeep { limit: self.settings.max_depth })
        } else {
            Ok(())
        }
    }

    fn lookup(&self, name: &str) -> Result<&'a ConstructDef, NodeError> {
        self.constructs.get(name).ok_or_else(|| NodeError::UnknownConstruct { name: name.into() })
    }

    /// Reduces one region to postfix. Nested regions are scanned recursively, so that each forms
    /// its own sequence.
    fn to_postfix(&self, list: &UnstructuredNodeList, depth: usize) -> Result<Vec<Postfix>, NodeError> {
        self.check_depth(depth)?;

        let nodes = list.flattened();
        let mut output: Vec<Postfix> = vec![];
        let mut operators: Vec<(ConstructRef, bool)> = vec![];
        let mut last = Last::Nothing;

        for (position, node) in nodes.iter().enumerate() {
            if let UnstructuredNode::Operator(name) = node {
                if last != Last::Operand {
                    return Err(NodeError::UnbalancedOperand { position });
                }

                let def = self.lookup(name)?;
                if !def.is_operator() {
                    return Err(NodeError::MisplacedConstruct { name: name.clone(), position });
                }

                // Anything at least as tight as the incoming operator is complete
                let incoming = Precedence::of(def.id);
                while let Some((top, _)) = operators.last() {
                    if Precedence::of(top.id) < incoming {
                        break;
                    }
                    if let Some((construct, nary)) = operators.pop() {
                        output.push(Postfix::Operator { construct, nary });
                    }
                }

                operators.push((ConstructRef::new(def.id, name.as_str()), def.shape() == Shape::NaryOperator));
                last = Last::Operator;
                continue;
            }

            if last == Last::Operand {
                return Err(NodeError::AdjacentOperands { position });
            }
            self.push_operand(node, position, depth, &mut output)?;
            last = Last::Operand;
        }

        match last {
            Last::Nothing => return Err(NodeError::EmptyExpression { position: 0 }),
            Last::Operator => return Err(NodeError::UnbalancedOperator { position: nodes.len() - 1 }),
            Last::Operand => (),
        }

        while let Some((construct, nary)) = operators.pop() {
            output.push(Postfix::Operator { construct, nary });
        }

        Ok(output)
    }

    fn push_operand(&self, node: &UnstructuredNode, position: usize, depth: usize, output: &mut Vec<Postfix>) -> Result<(), NodeError> {
        match node {
            UnstructuredNode::Number(value) => output.push(Postfix::Number(*value)),
            UnstructuredNode::Variable(name) => output.push(Postfix::Variable(*name)),

            UnstructuredNode::Text(input) => output.extend(self.text_operand(input, depth)),

            UnstructuredNode::Construct(name, regions) => {
                let def = self.lookup(name)?;
                let shape = match def.shape() {
                    Shape::Unary => RegionShape::Unary,
                    Shape::Grouping => RegionShape::Grouping,
                    Shape::BinaryLayout => RegionShape::Binary,
                    Shape::NaryFunction(_) => RegionShape::NaryFunction,
                    Shape::NaryOperator | Shape::BinaryOperator | Shape::Matrix =>
                        return Err(NodeError::MisplacedConstruct { name: name.clone(), position }),
                };

                let expected = def.region_count().unwrap_or(0);
                if regions.len() != expected {
                    return Err(NodeError::SlotCount { name: name.clone(), expected, found: regions.len() });
                }

                let mut slots = Vec::with_capacity(expected);
                for slot in 0..expected {
                    slots.push(self.to_postfix(&regions[def.region_for_slot(slot)], depth + 1)?);
                }

                output.push(Postfix::Construct {
                    construct: ConstructRef::new(def.id, name.as_str()),
                    shape,
                    regions: slots,
                });
            }

            UnstructuredNode::Matrix { name, rows, cols, cells } => {
                let def = self.lookup(name)?;
                if def.shape() != Shape::Matrix {
                    return Err(NodeError::MisplacedConstruct { name: name.clone(), position });
                }
                if *rows == 0 || *cols == 0 || cells.len() != rows * cols {
                    return Err(NodeError::SlotCount { name: name.clone(), expected: rows * cols, found: cells.len() });
                }

                let regions = cells.iter()
                    .map(|cell| self.to_postfix(cell, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;

                output.push(Postfix::Construct {
                    construct: ConstructRef::new(def.id, name.as_str()),
                    shape: RegionShape::Matrix { rows: *rows, cols: *cols },
                    regions,
                });
            }

            // Handled by the caller
            UnstructuredNode::Operator(_) | UnstructuredNode::Region(_) => unreachable!(),
        }

        Ok(())
    }

    /// Parses the contents of a text box. Text which cannot be parsed, or which nests deeper than
    /// the remaining depth allows, stays as literal text.
    fn text_operand(&self, input: &str, depth: usize) -> Vec<Postfix> {
        let remaining = self.settings.max_depth.saturating_sub(depth);
        let parsed = text::text_to_postfix(input, self.constructs, remaining).and_then(|items| {
            match postfix::assemble(items.clone(), remaining) {
                Ok(_) => Ok(items),
                Err(NodeError::TooDeep { limit }) => Err(ParseError::TooDeep { limit }),
                Err(e) => Err(ParseError::Syntax { message: e.to_string(), position: 0 }),
            }
        });

        parsed.unwrap_or_else(|e| {
            warn!("keeping {:?} as text: {}", input, e);
            vec![Postfix::Text(input.to_string())]
        })
    }
}
