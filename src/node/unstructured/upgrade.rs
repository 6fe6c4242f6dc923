//! Defines and implements the [Upgradable] trait, for converting to a
//! [structured](crate::node::structured) tree.

use crate::config::ConstructTable;
use crate::error::NodeError;
use crate::node::builder::Builder;
use crate::node::structured::StructuredTree;
use crate::node::unstructured::{UnstructuredNode, UnstructuredNodeList};

/// The nesting depth allowed by [BuildSettings::default].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while upgrading.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct BuildSettings {
    /// How deeply regions, constructs and parsed text may nest before upgrading gives up with
    /// [NodeError::TooDeep].
    pub max_depth: usize,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Implemented by types which can be _upgraded_ - that is, converted into a
/// [structured](crate::node::structured) tree.
pub trait Upgradable {
    /// Attempts to upgrade this token sequence, and returns a [StructuredTree] if it succeeds.
    ///
    /// Failures will primarily occur due to syntax errors; for example, `3+` would be a valid
    /// unstructured sequence (a pair of two tokens, `3` and `+`), but cannot be encoded as a
    /// structured tree because it is not a syntactically valid mathematical expression. In cases
    /// like this, a [NodeError] is returned instead.
    ///
    /// Text tokens never cause a failure; text which does not parse is kept as a literal leaf.
    fn upgrade(&self, constructs: &ConstructTable) -> Result<StructuredTree, NodeError> {
        self.upgrade_with(constructs, &BuildSettings::default())
    }

    /// Like [Upgradable::upgrade], with explicit limits.
    fn upgrade_with(&self, constructs: &ConstructTable, settings: &BuildSettings) -> Result<StructuredTree, NodeError>;
}

impl Upgradable for UnstructuredNodeList {
    fn upgrade_with(&self, constructs: &ConstructTable, settings: &BuildSettings) -> Result<StructuredTree, NodeError> {
        Builder::new(constructs, settings).build(self)
    }
}

impl Upgradable for UnstructuredNode {
    fn upgrade_with(&self, constructs: &ConstructTable, settings: &BuildSettings) -> Result<StructuredTree, NodeError> {
        UnstructuredNodeList { items: vec![self.clone()] }.upgrade_with(constructs, settings)
    }
}
