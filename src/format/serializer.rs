use log::debug;

use crate::error::SerializeError;
use crate::format::{FormatTemplates, Template};
use crate::node::structured::{NodeId, NodeKind, StructuredTree, MULTIPLY_ID};
use crate::node::unstructured::DEFAULT_MAX_DEPTH;
use crate::number::format_number;
use crate::precedence::Precedence;

/// Options which affect rendering without being part of a format.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct SerializeOptions {
    /// Leave out the separator between the operands of a multiplication.
    pub implicit_mult: bool,

    /// Render whole numbers with a decimal point (`3.0` rather than `3`).
    pub keep_as_decimal: bool,

    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions { implicit_mult: false, keep_as_decimal: false, max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Renders `tree` using `templates`.
///
/// Rendering stops at the first construct which needs a fragment the templates do not provide, and
/// the partial output is discarded.
pub fn serialize(tree: &StructuredTree, templates: &FormatTemplates, options: &SerializeOptions) -> Result<String, SerializeError> {
    let mut serializer = Serializer { tree, templates, options, out: String::new() };

    serializer.optional("Initial", "output1");
    serializer.node(tree.root(), 0)?;
    serializer.optional("Initial", "output2");

    debug!("serialized {} nodes as {}", tree.len(), templates.name());
    Ok(serializer.out)
}

struct Serializer<'a> {
    tree: &'a StructuredTree,
    templates: &'a FormatTemplates,
    options: &'a SerializeOptions,
    out: String,
}

impl<'a> Serializer<'a> {
    fn template(&self, construct: &str) -> Option<&'a Template> {
        self.templates.get(construct)
    }

    fn lookup(&self, construct: &str, fragment: &str) -> Result<&'a str, SerializeError> {
        self.template(construct)
            .and_then(|t| t.fragment(fragment))
            .ok_or_else(|| SerializeError::MissingTemplateEntry {
                construct: construct.into(),
                fragment: fragment.into(),
            })
    }

    fn required(&mut self, construct: &str, fragment: &str) -> Result<(), SerializeError> {
        let text = self.lookup(construct, fragment)?;
        self.out.push_str(text);
        Ok(())
    }

    fn optional(&mut self, construct: &str, fragment: &str) {
        if let Some(text) = self.template(construct).and_then(|t| t.fragment(fragment)) {
            self.out.push_str(text);
        }
    }

    /// Whether an operator node gets automatic brackets.
    fn needs_brackets(&self, id: NodeId) -> bool {
        if !self.templates.auto_brackets() {
            return false;
        }

        let node = self.tree.node(id);
        if self.template(node.name()).is_some_and(|t| !t.takes_brackets()) {
            return false;
        }

        match node.parent() {
            Some(parent) => Precedence::of(node.id()) <= Precedence::of(self.tree.node(parent).id()),
            None => false,
        }
    }

    /// Whether the argument of a function written without brackets, such as a unary minus, needs
    /// them anyway: an addition or looser operator would otherwise read as part of the surrounding
    /// expression.
    fn needs_argument_brackets(&self, child: NodeId) -> bool {
        let node = self.tree.node(child);
        self.templates.auto_brackets()
            && matches!(node.kind(), NodeKind::BinaryOp { .. } | NodeKind::NaryOp { .. })
            && Precedence::of(node.id()) <= Precedence::AddSub
            && !self.needs_brackets(child)
    }

    fn node(&mut self, id: NodeId, depth: usize) -> Result<(), SerializeError> {
        if depth > self.options.max_depth {
            return Err(SerializeError::TooDeep { limit: self.options.max_depth });
        }

        let tree = self.tree;
        let node = tree.node(id);
        let name = node.name();

        match node.kind() {
            NodeKind::Text(text) if text == "Infinity" => self.required("Infinity", "output")?,

            NodeKind::Text(text) => {
                self.optional("Text", "initial");
                self.required("Text", "output1")?;
                self.out.push_str(text);
                self.required("Text", "output2")?;
            }

            NodeKind::Number(value) => {
                self.optional("Number", "initial");
                self.required("Number", "output1")?;
                self.out.push_str(&format_number(*value, self.options.keep_as_decimal));
                self.required("Number", "output2")?;
            }

            NodeKind::Variable(c) => {
                let symbol = c.to_string();
                match self.template(&symbol).and_then(|t| t.fragment("output")) {
                    Some(text) => self.out.push_str(text),
                    None => {
                        self.required(name, "output1")?;
                        self.out.push(*c);
                        self.required(name, "output2")?;
                    }
                }
            }

            NodeKind::BinaryOp { left, right } => {
                let brackets = self.needs_brackets(id);
                let reverse = self.template(name).is_some_and(|t| t.reverse);
                let (first, second) = if reverse { (*right, *left) } else { (*left, *right) };

                self.optional(name, "initial");
                if brackets { self.required("AutoBracket", "output1")?; }
                self.required(name, "output1")?;
                self.node(first, depth + 1)?;
                self.required(name, "output2")?;
                self.node(second, depth + 1)?;
                self.optional(name, "output3");
                if brackets { self.required("AutoBracket", "output2")?; }
                self.optional(name, "final");
            }

            NodeKind::NaryOp { children } => {
                let brackets = self.needs_brackets(id);
                let implicit = self.options.implicit_mult && node.id() == MULTIPLY_ID;

                self.optional(name, "initial");
                if brackets { self.required("AutoBracket", "output1")?; }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 && !implicit {
                        self.required(name, "output")?;
                    }
                    self.node(*child, depth + 1)?;
                }
                if brackets { self.required("AutoBracket", "output2")?; }
                self.optional(name, "final");
            }

            NodeKind::UnaryFunc { child } => {
                let brackets = self.template(name).map_or(true, |t| t.takes_brackets())
                    || self.needs_argument_brackets(*child);

                self.optional(name, "initial");
                self.required(name, "output1")?;
                if brackets { self.required("AutoBracket", "output1")?; }
                self.node(*child, depth + 1)?;
                if brackets { self.required("AutoBracket", "output2")?; }
                self.required(name, "output2")?;
            }

            NodeKind::Grouping { child } => {
                self.optional(name, "initial");
                self.required(name, "output1")?;
                self.node(*child, depth + 1)?;
                self.required(name, "output2")?;
                self.optional(name, "final");
            }

            NodeKind::NaryFunc { children } => {
                let order = match self.template(name).and_then(|t| t.order.clone()) {
                    Some(order) if order.len() != children.len() || order.iter().any(|&i| i >= children.len()) =>
                        return Err(SerializeError::InvalidOrder { construct: name.into() }),
                    Some(order) => order,
                    None => (0..children.len()).collect(),
                };

                self.optional(name, "initial");
                self.required(name, "output1")?;
                for (i, &slot) in order.iter().enumerate() {
                    self.node(children[slot], depth + 1)?;
                    self.required(name, &format!("output{}", i + 2))?;
                }
                self.optional(name, "final");
            }

            NodeKind::Matrix { rows, cols, cells } => {
                self.required(name, "matrix_start")?;
                for r in 0..*rows {
                    if r > 0 { self.required(name, "row_separator")?; }
                    self.required(name, "row_start")?;
                    for c in 0..*cols {
                        if c > 0 { self.required(name, "element_separator")?; }
                        self.required(name, "element_start")?;
                        self.node(cells[r * cols + c], depth + 1)?;
                        self.required(name, "element_end")?;
                    }
                    self.required(name, "row_end")?;
                }
                self.required(name, "matrix_end")?;
            }
        }

        Ok(())
    }
}
