use super::lexer::{Operator, Spanned, Token};
use super::{lookup_function, Arity, EngineNode};
use crate::error::ParseError;

/// Binding power of prefix operators: tighter than `*`, looser than `^`, so `-x^2` is `-(x^2)`.
const PREFIX_PRECEDENCE: u8 = 7;

/// Parses a token stream into an [EngineNode] with precedence climbing.
pub(crate) struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// `end` is the character length of the input, reported when it runs out early.
    pub(crate) fn new(tokens: &'a [Spanned], end: usize, max_depth: usize) -> Self {
        Parser { tokens, pos: 0, end, max_depth }
    }

    pub(crate) fn parse(&mut self) -> Result<EngineNode, ParseError> {
        if self.tokens.is_empty() {
            return Err(self.error("empty expression"));
        }

        let result = self.parse_expr(0, 0)?;
        if self.current().is_some() {
            return Err(self.error("unexpected input after the end of the expression"));
        }

        Ok(result)
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, message: &str) -> ParseError {
        let position = self.tokens.get(self.pos).map_or(self.end, |s| s.position);
        ParseError::Syntax { message: message.into(), position }
    }

    fn expect_right_paren(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Some(Token::RightParen) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error("expected ')'")),
        }
    }

    fn parse_expr(&mut self, min_precedence: u8, depth: usize) -> Result<EngineNode, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::TooDeep { limit: self.max_depth });
        }

        let mut left = self.parse_prefix(depth)?;

        // A run of the same left-associative operator is collected into one node, so `a-b-c` is
        // `Subtract(a, b, c)`. Every other fold nests `left` one level deeper.
        let mut chain: Option<Operator> = None;
        let mut folds = 0;

        while let Some(Token::Operator(op)) = self.current() {
            let precedence = match op.precedence() {
                Some(p) if p >= min_precedence => p,
                _ => break,
            };
            self.advance();

            let next_min = if op.is_right_associative() { precedence } else { precedence + 1 };
            let right = self.parse_expr(next_min, depth + 1)?;

            if chain == Some(*op) {
                if let EngineNode::Operator { args, .. } = &mut left {
                    args.push(right);
                    continue;
                }
            }

            folds += 1;
            if depth + folds > self.max_depth {
                return Err(ParseError::TooDeep { limit: self.max_depth });
            }
            left = EngineNode::Operator { class: op.class(), symbol: op.symbol(), args: vec![left, right] };
            chain = Some(*op);
        }

        Ok(left)
    }

    fn parse_arguments(&mut self, depth: usize) -> Result<Vec<EngineNode>, ParseError> {
        let mut args = vec![];

        if let Some(Token::RightParen) = self.current() {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expr(0, depth + 1)?);

            match self.current() {
                Some(Token::Comma) => self.advance(),
                Some(Token::RightParen) => break,
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }

        Ok(args)
    }

    fn parse_prefix(&mut self, depth: usize) -> Result<EngineNode, ParseError> {
        let token = self.current().ok_or_else(|| self.error("unexpected end of input"))?;

        match token {
            Token::Number(n) => {
                self.advance();
                Ok(EngineNode::Constant(*n))
            }

            Token::Identifier(name) => {
                let start = self.pos;
                self.advance();

                let Some(function) = lookup_function(name) else {
                    return Ok(EngineNode::Variable(name.clone()));
                };

                if self.current() != Some(&Token::LeftParen) {
                    return Err(self.error("expected '(' after function name"));
                }
                self.advance();
                let args = self.parse_arguments(depth)?;
                self.expect_right_paren()?;

                let arity_ok = match function.arity {
                    Arity::Exactly(n) => args.len() == n,
                    Arity::AtLeast(n) => args.len() >= n,
                };
                if !arity_ok {
                    let position = self.tokens[start].position;
                    return Err(ParseError::Syntax {
                        message: format!("wrong number of arguments to '{}'", name),
                        position,
                    });
                }

                Ok(EngineNode::Function { class: function.class, args })
            }

            Token::Operator(op @ (Operator::Sub | Operator::Not)) => {
                self.advance();
                let operand = self.parse_expr(PREFIX_PRECEDENCE, depth + 1)?;
                let class = if *op == Operator::Sub { "UMinus" } else { op.class() };
                Ok(EngineNode::Operator { class, symbol: op.symbol(), args: vec![operand] })
            }

            Token::Operator(Operator::Add) => {
                self.advance();
                self.parse_expr(PREFIX_PRECEDENCE, depth + 1)
            }

            Token::LeftParen => {
                self.advance();
                let inner = self.parse_expr(0, depth + 1)?;
                self.expect_right_paren()?;
                Ok(EngineNode::Parenthesized(Box::new(inner)))
            }

            _ => Err(self.error("expected an operand")),
        }
    }
}
