//! Expression data structures in the two forms an expression passes through.
//!
//! [Unstructured](unstructured) nodes are the flat token sequences a visual editor produces, with
//! no notion of precedence. [Structured](structured) nodes form a tree in which every operator owns
//! its operands, ready to be rendered. Unstructured nodes are converted into structured ones by
//! [upgrading](unstructured::Upgradable) them, which goes through a [postfix] form.

pub mod unstructured;
pub mod structured;
pub mod postfix;
mod builder;
