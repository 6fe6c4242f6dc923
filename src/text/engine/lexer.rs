//! Splits engine input into tokens.

use crate::error::ParseError;
use crate::number::parse_number;

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Not,
}

impl Operator {
    /// Binding power as an infix operator. `Not` is prefix-only.
    pub(crate) fn precedence(&self) -> Option<u8> {
        match self {
            Operator::Or => Some(1),
            Operator::And => Some(2),
            Operator::Eq | Operator::Ne => Some(3),
            Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => Some(4),
            Operator::Add | Operator::Sub => Some(5),
            Operator::Mul | Operator::Div | Operator::Mod => Some(6),
            Operator::Pow => Some(8),
            Operator::Not => None,
        }
    }

    pub(crate) fn is_right_associative(&self) -> bool {
        *self == Operator::Pow
    }

    /// The class name the engine reports for this operator.
    pub(crate) fn class(&self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Sub => "Subtract",
            Operator::Mul => "Multiply",
            Operator::Div => "Divide",
            Operator::Mod => "Modulus",
            Operator::Pow => "Power",
            Operator::Eq | Operator::Ne | Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => "Comparative",
            Operator::And | Operator::Or => "Logical",
            Operator::Not => "Not",
        }
    }

    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "^",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub(crate) enum Token {
    Number(f64),
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
}

/// A token and the character index it starts at.
#[derive(PartialEq, Debug, Clone)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

fn syntax(message: impl Into<String>, position: usize) -> ParseError {
    ParseError::Syntax { message: message.into(), position }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = vec![];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let token = if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) {
            i = scan_number(&chars, i);
            let text: String = chars[start..i].iter().collect();
            Token::Number(parse_number(&text).ok_or_else(|| syntax(format!("invalid number '{}'", text), start))?)
        } else if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            Token::Identifier(chars[start..i].iter().collect())
        } else {
            let next = chars.get(i + 1).copied();
            let (token, width) = match (c, next) {
                ('(', _) => (Token::LeftParen, 1),
                (')', _) => (Token::RightParen, 1),
                (',', _) => (Token::Comma, 1),
                ('=', Some('=')) => (Token::Operator(Operator::Eq), 2),
                ('!', Some('=')) => (Token::Operator(Operator::Ne), 2),
                ('<', Some('=')) => (Token::Operator(Operator::Le), 2),
                ('>', Some('=')) => (Token::Operator(Operator::Ge), 2),
                ('&', Some('&')) => (Token::Operator(Operator::And), 2),
                ('|', Some('|')) => (Token::Operator(Operator::Or), 2),
                ('<', _) => (Token::Operator(Operator::Lt), 1),
                ('>', _) => (Token::Operator(Operator::Gt), 1),
                ('!', _) => (Token::Operator(Operator::Not), 1),
                ('+', _) => (Token::Operator(Operator::Add), 1),
                ('-', _) => (Token::Operator(Operator::Sub), 1),
                ('*', _) => (Token::Operator(Operator::Mul), 1),
                ('/', _) => (Token::Operator(Operator::Div), 1),
                ('%', _) => (Token::Operator(Operator::Mod), 1),
                ('^', _) => (Token::Operator(Operator::Pow), 1),
                _ => return Err(syntax(format!("unexpected character '{}'", c), start)),
            };
            i += width;
            token
        };

        tokens.push(Spanned { token, position: start });
    }

    Ok(tokens)
}

/// Returns the index just past the number starting at `start`.
fn scan_number(chars: &[char], start: usize) -> usize {
    let digits = |mut i: usize| {
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = digits(start);
    if chars.get(i) == Some(&'.') {
        i = digits(i + 1);
    }

    // Only take an exponent if digits follow it, so `2e` stays a number and a name
    if matches!(chars.get(i), Some('e' | 'E')) {
        let mut j = i + 1;
        if matches!(chars.get(j), Some('+' | '-')) {
            j += 1;
        }
        if chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
            i = digits(j);
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("12 3.5 .5 1e3 2.5E-2"), vec![
            Token::Number(12.0),
            Token::Number(3.5),
            Token::Number(0.5),
            Token::Number(1000.0),
            Token::Number(0.025),
        ]);

        assert_eq!(kinds("2e"), vec![Token::Number(2.0), Token::Identifier("e".into())]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(kinds("a<=b"), vec![
            Token::Identifier("a".into()),
            Token::Operator(Operator::Le),
            Token::Identifier("b".into()),
        ]);
        assert_eq!(kinds("!= == < > && || ! % ^"), vec![
            Token::Operator(Operator::Ne),
            Token::Operator(Operator::Eq),
            Token::Operator(Operator::Lt),
            Token::Operator(Operator::Gt),
            Token::Operator(Operator::And),
            Token::Operator(Operator::Or),
            Token::Operator(Operator::Not),
            Token::Operator(Operator::Mod),
            Token::Operator(Operator::Pow),
        ]);
    }

    #[test]
    fn test_identifiers_and_positions() {
        let tokens = tokenize("sin(π_1, x2)").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("sin".into()));
        assert_eq!(tokens[1].token, Token::LeftParen);
        assert_eq!(tokens[2].token, Token::Identifier("π_1".into()));
        assert_eq!(tokens[3].token, Token::Comma);
        assert_eq!(tokens[4], Spanned { token: Token::Identifier("x2".into()), position: 9 });
        assert_eq!(tokens[5].token, Token::RightParen);
    }

    #[test]
    fn test_rejects_lone_equals() {
        assert_eq!(
            tokenize("=5"),
            Err(ParseError::Syntax { message: "unexpected character '='".into(), position: 0 }),
        );
    }
}
