use thiserror::Error;

/// Raised when a token sequence cannot be upgraded into an expression tree.
///
/// Positions are token indices within the region where the problem was found, so that the editor
/// can point at (or fall back to literal text for) just that region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("an operator at position {position} has no operand before it")]
    UnbalancedOperand { position: usize },

    #[error("the expression ends with an operator at position {position}")]
    UnbalancedOperator { position: usize },

    #[error("two operands are next to each other at position {position} with no operator between them")]
    AdjacentOperands { position: usize },

    #[error("empty expression at position {position}")]
    EmptyExpression { position: usize },

    #[error("unknown construct '{name}'")]
    UnknownConstruct { name: String },

    #[error("construct '{name}' cannot be used at position {position}")]
    MisplacedConstruct { name: String, position: usize },

    #[error("construct '{name}' expects {expected} slot(s), but {found} were given")]
    SlotCount { name: String, expected: usize, found: usize },

    #[error("expression is nested more than {limit} levels deep")]
    TooDeep { limit: usize },
}

/// Raised by the text parser. Constructs missing from the configuration table never surface here;
/// they make the parse fall back to literal text instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at character {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("expression is nested more than {limit} levels deep")]
    TooDeep { limit: usize },
}

/// Raised while rendering a tree through a format's templates. Any of these abandons the whole
/// rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("the output format has no '{fragment}' entry for '{construct}'")]
    MissingTemplateEntry { construct: String, fragment: String },

    #[error("the output format's child order for '{construct}' does not match its arguments")]
    InvalidOrder { construct: String },

    #[error("expression is nested more than {limit} levels deep")]
    TooDeep { limit: usize },
}

/// Raised while loading a construct table or a template store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration for '{name}': {reason}")]
    Invalid { name: String, reason: String },
}
