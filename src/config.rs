//! The construct configuration table, which tells the builder and the text parser what each named
//! construct is: its identity, and how many operands or slots it takes.
//!
//! The table is plain data loaded from TOML, one table per construct name:
//!
//! ```toml
//! [Add]
//! id = 2
//! group = "nary"
//!
//! [DefiniteIntegral]
//! id = 53
//! group = "layout"
//! layout = "slots"
//! slots = 4
//! slot_order = [2, 3, 1, 0]
//! ```
//!
//! A table is loaded once and shared by reference with everything that needs it.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::node::structured::ConstructId;

const BUILTIN_CONSTRUCTS: &str = include_str!("../data/constructs.toml");

/// How a construct takes its operands.
#[derive(Deserialize, PartialEq, Eq, Debug, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// A multi-slot region laid out visually, such as a fraction, a root or a definite integral.
    /// Which node it becomes is determined by its [LayoutKind].
    Layout,

    /// An operator which is flattened when chained, such as `+`.
    Nary,

    /// An operator with exactly two operands, such as `=`.
    Binary,

    /// A function of one argument, such as `sin`.
    Function,

    /// Brackets or something bracket-like around one region.
    Grouping,
}

/// The shape of a [Group::Layout] construct.
#[derive(Deserialize, PartialEq, Eq, Debug, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Two slots which behave like the operands of a binary operator (fraction, n-th root,
    /// superscript, subscript).
    Operator,

    /// A single slot, e.g. a square root.
    Function,

    /// A fixed number of slots, given by `slots`.
    Slots,

    /// A grid of cells whose size is chosen by the editor.
    Matrix,
}

/// The configuration for a single construct.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConstructDef {
    pub id: ConstructId,
    pub group: Group,
    #[serde(default)]
    pub layout: Option<LayoutKind>,
    #[serde(default)]
    pub slots: Option<usize>,

    /// For layouts, maps each slot of the built node to the index of the editor region which fills
    /// it. Editors hand regions over in on-screen reading order, which is not always argument order
    /// (the bounds of an integral are read before its integrand).
    #[serde(default)]
    pub slot_order: Option<Vec<usize>>,
}

/// What a construct becomes in the tree. Derived from a [ConstructDef].
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Shape {
    NaryOperator,
    BinaryOperator,
    /// Two slots, left then right.
    BinaryLayout,
    Unary,
    Grouping,
    NaryFunction(usize),
    Matrix,
}

impl ConstructDef {
    pub fn shape(&self) -> Shape {
        match self.group {
            Group::Nary => Shape::NaryOperator,
            Group::Binary => Shape::BinaryOperator,
            Group::Function => Shape::Unary,
            Group::Grouping => Shape::Grouping,
            Group::Layout => match self.layout {
                Some(LayoutKind::Operator) => Shape::BinaryLayout,
                Some(LayoutKind::Slots) => Shape::NaryFunction(self.slots.unwrap_or(2)),
                Some(LayoutKind::Matrix) => Shape::Matrix,
                Some(LayoutKind::Function) | None => Shape::Unary,
            },
        }
    }

    /// Returns true if this construct can appear as an operator between two operands.
    pub fn is_operator(&self) -> bool {
        matches!(self.shape(), Shape::NaryOperator | Shape::BinaryOperator | Shape::BinaryLayout)
    }

    /// The number of editor regions this construct owns, or `None` for operators and matrices.
    pub fn region_count(&self) -> Option<usize> {
        match self.shape() {
            Shape::Unary | Shape::Grouping => Some(1),
            Shape::BinaryLayout => Some(2),
            Shape::NaryFunction(n) => Some(n),
            Shape::NaryOperator | Shape::BinaryOperator | Shape::Matrix => None,
        }
    }

    /// The editor region feeding slot `slot`.
    pub fn region_for_slot(&self, slot: usize) -> usize {
        self.slot_order
            .as_ref()
            .and_then(|order| order.get(slot).copied())
            .unwrap_or(slot)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid { name: name.into(), reason: reason.into() });

        if self.id < 0 {
            return invalid("identities must not be negative");
        }
        if self.group == Group::Layout && self.layout.is_none() {
            return invalid("layout constructs need a `layout` kind");
        }
        if self.group != Group::Layout && (self.layout.is_some() || self.slot_order.is_some()) {
            return invalid("only layout constructs may set `layout` or `slot_order`");
        }
        if let Shape::NaryFunction(n) = self.shape() {
            if self.slots.is_none() || n < 2 {
                return invalid("slot layouts need `slots` of at least 2");
            }
        }
        if let Some(order) = &self.slot_order {
            let count = self.region_count().unwrap_or(0);
            let mut seen = order.clone();
            seen.sort_unstable();
            if order.len() != count || seen.iter().enumerate().any(|(i, &r)| i != r) {
                return invalid("`slot_order` must list every region exactly once");
            }
        }

        Ok(())
    }
}

/// Maps construct names to their configuration.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct ConstructTable {
    constructs: HashMap<String, ConstructDef>,
}

impl ConstructTable {
    /// The construct table bundled with this crate.
    pub fn builtin() -> ConstructTable {
        Self::from_toml_str(BUILTIN_CONSTRUCTS)
            .unwrap_or_else(|e| panic!("bundled construct table is invalid: {}", e))
    }

    pub fn from_toml_str(source: &str) -> Result<ConstructTable, ConfigError> {
        let constructs: HashMap<String, ConstructDef> = toml::from_str(source)?;
        for (name, def) in &constructs {
            def.validate(name)?;
        }

        log::debug!("loaded {} construct definitions", constructs.len());
        Ok(ConstructTable { constructs })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<ConstructTable, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn get(&self, name: &str) -> Option<&ConstructDef> {
        self.constructs.get(name)
    }

    /// Adds or replaces a construct.
    pub fn insert(&mut self, name: impl Into<String>, def: ConstructDef) -> Result<(), ConfigError> {
        let name = name.into();
        def.validate(&name)?;
        self.constructs.insert(name, def);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.constructs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = ConstructTable::builtin();

        let add = table.get("Add").unwrap();
        assert_eq!(add.id, 2);
        assert_eq!(add.shape(), Shape::NaryOperator);

        assert_eq!(table.get("Subtract").unwrap().shape(), Shape::BinaryOperator);
        assert_eq!(table.get("Divide").unwrap().shape(), Shape::BinaryLayout);
        assert_eq!(table.get("Sine").unwrap().shape(), Shape::Unary);
        assert_eq!(table.get("SquareRoot").unwrap().shape(), Shape::Unary);
        assert_eq!(table.get("Parentheses").unwrap().shape(), Shape::Grouping);
        assert_eq!(table.get("DefiniteIntegral").unwrap().shape(), Shape::NaryFunction(4));
        assert_eq!(table.get("Evaluate").unwrap().shape(), Shape::NaryFunction(3));
        assert_eq!(table.get("Differential").unwrap().shape(), Shape::NaryFunction(2));
        assert_eq!(table.get("Matrix").unwrap().shape(), Shape::Matrix);

        assert!(table.get("Nonsense").is_none());
    }

    #[test]
    fn test_identities_match_precedence_table() {
        use crate::precedence::Precedence;

        let table = ConstructTable::builtin();
        let class = |name: &str| Precedence::of(table.get(name).unwrap().id);

        assert_eq!(class("Multiply"), Precedence::MulDiv);
        assert_eq!(class("Divide"), Precedence::MulDiv);
        assert_eq!(class("Add"), Precedence::AddSub);
        assert_eq!(class("Subtract"), Precedence::AddSub);
        assert_eq!(class("Power"), Precedence::ExponentRoot);
        assert_eq!(class("SquareRoot"), Precedence::ExponentRoot);
        assert_eq!(class("Equals"), Precedence::None);
    }

    #[test]
    fn test_slot_order() {
        let table = ConstructTable::builtin();
        let integral = table.get("DefiniteIntegral").unwrap();

        // Integrand and variable come after the two bounds on screen
        assert_eq!(integral.region_for_slot(0), 2);
        assert_eq!(integral.region_for_slot(1), 3);
        assert_eq!(integral.region_for_slot(2), 1);
        assert_eq!(integral.region_for_slot(3), 0);

        assert_eq!(table.get("Evaluate").unwrap().region_for_slot(2), 2);
    }

    #[test]
    fn test_insert() {
        let mut table = ConstructTable::default();
        assert!(table.is_empty());

        table.insert("Cross", ConstructDef { id: 70, group: Group::Binary, layout: None, slots: None, slot_order: None }).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Cross").unwrap().shape(), Shape::BinaryOperator);

        let bad = ConstructDef { id: 71, group: Group::Layout, layout: None, slots: None, slot_order: None };
        assert!(table.insert("Box", bad).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rejects_bad_definitions() {
        assert!(matches!(
            ConstructTable::from_toml_str("[Frac]\nid = 1\ngroup = \"layout\"\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ConstructTable::from_toml_str("[Int]\nid = 53\ngroup = \"layout\"\nlayout = \"slots\"\nslots = 4\nslot_order = [0, 0, 1, 2]\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ConstructTable::from_toml_str("[Add]\nid = 2\ngroup = \"sideways\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }
}
