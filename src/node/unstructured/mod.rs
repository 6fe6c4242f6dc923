//! The unstructured token sequence, as produced by a visual editor.
//!
//! Unstructured nodes have a very loose structure: a flat list of operands and operators, only
//! introducing nested lists where the editor shows something laid out (e.g. the regions of a
//! definite integral, or the cells of a matrix). Operators carry no precedence information yet.
//!
//! These can not be rendered directly; they need to be [upgraded](Upgradable) to a
//! [structured](crate::node::structured) tree first.

mod node;
pub use node::*;

mod upgrade;
pub use upgrade::*;
