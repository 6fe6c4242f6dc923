//! A small algebra engine which reads infix text into a generic parse tree.
//!
//! The engine knows nothing about constructs or templates. It reports operators and functions by
//! class name (e.g. `Subtract`, `Sine`, `Comparative`), which [crate::text] then maps onto the
//! construct table.
//!
//! Parsing runs in three stages: the lexer, implicit multiplication insertion, and a Pratt parser.
//! Precedence from loosest to tightest is `||`, `&&`, `== !=`, `< > <= >=`, `+ -`, `* / %`, prefix
//! `- + !`, and finally `^`, which is right-associative.

mod implicit_mul;
mod lexer;
mod pratt;

use crate::error::ParseError;

/// A node of the engine's parse tree.
#[derive(PartialEq, Debug, Clone)]
pub enum EngineNode {
    Constant(f64),
    Variable(String),

    /// An expression written inside brackets.
    Parenthesized(Box<EngineNode>),

    /// A prefix or infix operator. `symbol` is the operator as written, which tells comparisons
    /// apart (they all share the `Comparative` class). A chain of one left-associative infix
    /// operator has all of its operands in `args`, in reading order.
    Operator { class: &'static str, symbol: &'static str, args: Vec<EngineNode> },

    /// A call of a known function.
    Function { class: &'static str, args: Vec<EngineNode> },
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub(crate) enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub(crate) struct FunctionInfo {
    pub name: &'static str,
    pub class: &'static str,
    pub arity: Arity,
}

const fn function(name: &'static str, class: &'static str, arity: Arity) -> FunctionInfo {
    FunctionInfo { name, class, arity }
}

/// Every function the engine understands.
const FUNCTIONS: &[FunctionInfo] = &[
    function("sin", "Sine", Arity::Exactly(1)),
    function("cos", "Cosine", Arity::Exactly(1)),
    function("tan", "Tangent", Arity::Exactly(1)),
    function("asin", "ArcSine", Arity::Exactly(1)),
    function("acos", "ArcCosine", Arity::Exactly(1)),
    function("atan", "ArcTangent", Arity::Exactly(1)),
    function("sinh", "SineH", Arity::Exactly(1)),
    function("cosh", "CosineH", Arity::Exactly(1)),
    function("tanh", "TanH", Arity::Exactly(1)),
    function("asinh", "ArcSineH", Arity::Exactly(1)),
    function("acosh", "ArcCosineH", Arity::Exactly(1)),
    function("atanh", "ArcTanH", Arity::Exactly(1)),
    function("ln", "NaturalLogarithm", Arity::Exactly(1)),
    function("log", "Logarithm", Arity::Exactly(1)),
    function("exp", "Exponential", Arity::Exactly(1)),
    function("sqrt", "SquareRoot", Arity::Exactly(1)),
    function("root", "NthRoot", Arity::Exactly(2)),
    function("abs", "Abs", Arity::Exactly(1)),
    function("mod", "Modulus", Arity::Exactly(2)),
    function("fact", "Factorial", Arity::Exactly(1)),
    function("det", "Determinant", Arity::Exactly(1)),
    function("trace", "Trace", Arity::Exactly(1)),
    function("union", "Union", Arity::Exactly(2)),
    function("intersection", "Intersection", Arity::Exactly(2)),
    function("subset", "Subset", Arity::Exactly(2)),
    function("int", "Integral", Arity::AtLeast(1)),
    function("integrate", "Integral", Arity::AtLeast(1)),
    function("diff", "Differential", Arity::Exactly(2)),
    function("pdiff", "PartialDifferential", Arity::Exactly(2)),
    function("sum", "Sum", Arity::Exactly(4)),
    function("product", "Product", Arity::Exactly(4)),
    function("lim", "Limit", Arity::Exactly(3)),
    function("eval", "Evaluate", Arity::Exactly(3)),
];

pub(crate) fn lookup_function(name: &str) -> Option<FunctionInfo> {
    FUNCTIONS.iter().find(|f| f.name == name).copied()
}

/// Parses `input` into an engine tree. Expressions nested more than `max_depth` levels deep are
/// rejected with [ParseError::TooDeep].
pub fn parse(input: &str, max_depth: usize) -> Result<EngineNode, ParseError> {
    let tokens = lexer::tokenize(input)?;
    let tokens = implicit_mul::insert_implicit_multiplication(tokens, |name| lookup_function(name).is_some());
    pratt::Parser::new(&tokens, input.chars().count(), max_depth).parse()
}
