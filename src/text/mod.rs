//! Parses free text, such as the contents of a text box, into a [StructuredTree].
//!
//! Text is [normalized](normalize), parsed by the embedded [engine], and the engine's tree is then
//! mapped onto constructs by looking each operator and function class up in the
//! [ConstructTable]. If anything in the text has no construct, the whole text is kept as a single
//! literal leaf instead.

pub mod engine;
mod normalize;

pub use normalize::normalize;

use log::{debug, trace};

use crate::config::{ConstructDef, ConstructTable, Group, Shape};
use crate::error::{NodeError, ParseError};
use crate::node::postfix::{self, ConstructRef, Postfix, RegionShape};
use crate::node::structured::StructuredTree;
use crate::node::unstructured::BuildSettings;
use engine::EngineNode;

/// Parses `input` with the default [BuildSettings].
///
/// Returns a tree consisting of one text leaf (holding `input` unchanged) if the text parses but
/// uses something the construct table does not know about. Returns an error only if the text does
/// not parse at all.
pub fn parse_text(input: &str, constructs: &ConstructTable) -> Result<StructuredTree, ParseError> {
    parse_text_with(input, constructs, &BuildSettings::default())
}

pub fn parse_text_with(input: &str, constructs: &ConstructTable, settings: &BuildSettings) -> Result<StructuredTree, ParseError> {
    let items = text_to_postfix(input, constructs, settings.max_depth)?;
    postfix::assemble(items, settings.max_depth).map_err(|e| match e {
        NodeError::TooDeep { limit } => ParseError::TooDeep { limit },
        other => ParseError::Syntax { message: other.to_string(), position: 0 },
    })
}

/// Like [parse_text], but text which does not parse becomes a literal leaf too.
pub fn parse_text_or_literal(input: &str, constructs: &ConstructTable) -> StructuredTree {
    parse_text(input, constructs).unwrap_or_else(|e| {
        debug!("keeping {:?} as text: {}", input, e);
        StructuredTree::literal(input)
    })
}

/// Parses `input` into postfix form, ready to be spliced into a surrounding expression.
pub(crate) fn text_to_postfix(input: &str, constructs: &ConstructTable, max_depth: usize) -> Result<Vec<Postfix>, ParseError> {
    if input.trim().is_empty() {
        return Ok(vec![Postfix::Text(input.to_string())]);
    }

    let normalized = normalize(input);
    trace!("normalized {:?} to {:?}", input, normalized);
    let parsed = engine::parse(&normalized, max_depth)?;

    let mut out = vec![];
    match (Mapper { constructs, max_depth }).map(&parsed, &mut out, 0) {
        Ok(()) => Ok(out),
        Err(MapError::Unmapped(class)) => {
            debug!("no construct for '{}', keeping {:?} as text", class, input);
            Ok(vec![Postfix::Text(input.to_string())])
        }
        Err(MapError::TooDeep) => Err(ParseError::TooDeep { limit: max_depth }),
    }
}

enum MapError {
    /// The engine class which had no matching construct.
    Unmapped(String),
    TooDeep,
}

struct Mapper<'a> {
    constructs: &'a ConstructTable,
    max_depth: usize,
}

impl<'a> Mapper<'a> {
    fn lookup(&self, name: &str) -> Result<&'a ConstructDef, MapError> {
        self.constructs.get(name).ok_or_else(|| MapError::Unmapped(name.into()))
    }

    fn map(&self, node: &EngineNode, out: &mut Vec<Postfix>, depth: usize) -> Result<(), MapError> {
        if depth > self.max_depth {
            return Err(MapError::TooDeep);
        }

        match node {
            EngineNode::Constant(value) => out.push(Postfix::Number(*value)),

            EngineNode::Variable(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => out.push(Postfix::Variable(c)),
                    _ => out.push(Postfix::Text(name.clone())),
                }
            }

            EngineNode::Parenthesized(inner) => match self.constructs.get("Parentheses") {
                Some(def) if def.group == Group::Grouping => {
                    let region = self.region(inner, depth)?;
                    out.push(Postfix::Construct {
                        construct: ConstructRef::new(def.id, "Parentheses"),
                        shape: RegionShape::Grouping,
                        regions: vec![region],
                    });
                }
                _ => self.map(inner, out, depth + 1)?,
            },

            EngineNode::Operator { class, symbol, args } => {
                let (name, def) = match self.lookup(class) {
                    Ok(def) => (*class, def),
                    Err(e) => match comparison_name(symbol) {
                        Some(name) if *class == "Comparative" => (name, self.lookup(name)?),
                        _ => return Err(e),
                    },
                };
                self.map_construct(name, def, args, true, out, depth)?;
            }

            EngineNode::Function { class, args } => {
                if *class == "Integral" {
                    return self.map_integral(args, out, depth);
                }
                let def = self.lookup(class)?;
                self.map_construct(class, def, args, false, out, depth)?;
            }
        }

        Ok(())
    }

    fn region(&self, node: &EngineNode, depth: usize) -> Result<Vec<Postfix>, MapError> {
        let mut region = vec![];
        self.map(node, &mut region, depth + 1)?;
        Ok(region)
    }

    /// Writes `a b op c op ...` for an operator chain. Assembly absorbs the repeats of an n-ary
    /// operator and nests the rest to the left.
    fn map_chain(&self, construct: ConstructRef, nary: bool, args: &[EngineNode], out: &mut Vec<Postfix>, depth: usize) -> Result<(), MapError> {
        let [first, rest @ ..] = args else { return Err(MapError::Unmapped(construct.name)) };
        if rest.is_empty() {
            return Err(MapError::Unmapped(construct.name));
        }

        self.map(first, out, depth + 1)?;
        for arg in rest {
            self.map(arg, out, depth + 1)?;
            out.push(Postfix::Operator { construct: construct.clone(), nary });
        }
        Ok(())
    }

    fn map_construct(&self, name: &str, def: &ConstructDef, args: &[EngineNode], is_operator: bool, out: &mut Vec<Postfix>, depth: usize) -> Result<(), MapError> {
        let construct = ConstructRef::new(def.id, name);
        let wrong_arity = || MapError::Unmapped(name.into());

        match def.group {
            Group::Nary | Group::Binary => self.map_chain(construct, def.group == Group::Nary, args, out, depth)?,

            Group::Function | Group::Grouping => {
                let [only] = args else { return Err(wrong_arity()) };
                let shape = if def.group == Group::Function { RegionShape::Unary } else { RegionShape::Grouping };
                out.push(Postfix::Construct { construct, shape, regions: vec![self.region(only, depth)?] });
            }

            // A layout written as an operator, such as `^` or `/`
            Group::Layout if is_operator => self.map_chain(construct, false, args, out, depth)?,

            Group::Layout => {
                let shape = match (def.shape(), args.len()) {
                    (_, 0) => return Err(wrong_arity()),
                    (Shape::Matrix, _) => return Err(wrong_arity()),
                    (_, 1) => RegionShape::Unary,
                    (Shape::BinaryLayout, 2) => RegionShape::Binary,
                    _ => RegionShape::NaryFunction,
                };
                let regions = args.iter().map(|arg| self.region(arg, depth)).collect::<Result<Vec<_>, _>>()?;
                out.push(Postfix::Construct { construct, shape, regions });
            }
        }

        Ok(())
    }

    /// `int` and `integrate` become a definite integral when given bounds, and an indefinite one
    /// otherwise. A lone integrand is integrated over `x`.
    fn map_integral(&self, args: &[EngineNode], out: &mut Vec<Postfix>, depth: usize) -> Result<(), MapError> {
        let name = if args.len() >= 4 { "DefiniteIntegral" } else { "Integral" };
        let def = self.lookup(name)?;

        let mut regions = args.iter().map(|arg| self.region(arg, depth)).collect::<Result<Vec<_>, _>>()?;
        if regions.len() == 1 {
            regions.push(vec![Postfix::Variable('x')]);
        }

        out.push(Postfix::Construct {
            construct: ConstructRef::new(def.id, name),
            shape: RegionShape::NaryFunction,
            regions,
        });
        Ok(())
    }
}

/// The construct name for a comparison, by the symbol it was written with.
fn comparison_name(symbol: &str) -> Option<&'static str> {
    match symbol {
        "==" => Some("Equals"),
        "!=" => Some("NotEqual"),
        "<" => Some("LessThan"),
        ">" => Some("GreaterThan"),
        "<=" => Some("LTEQ"),
        ">=" => Some("GTEQ"),
        _ => None,
    }
}
