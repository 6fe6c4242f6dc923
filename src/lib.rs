pub mod error;
pub mod config;
pub mod node;
pub mod precedence;
pub mod number;
pub mod text;
pub mod format;

#[cfg(test)]
pub mod tests;

pub use crate::{
    config::ConstructTable,
    format::{BuiltinFormat, FormatTemplates, SerializeOptions, serialize},
    node::{
        unstructured::{BuildSettings, UnstructuredNode, UnstructuredNodeList, Upgradable},
        structured::{NodeId, NodeKind, StructuredTree},
    },
    text::{parse_text, parse_text_or_literal},
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
