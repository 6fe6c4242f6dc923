//! Implicit multiplication insertion, e.g. `2x` → `2 * x`.

use super::lexer::{Operator, Spanned, Token};

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token, next: &Token, is_function: &impl Fn(&str) -> bool) -> bool {
    match (current, next) {
        // A call like sin(x), not a product
        (Token::Identifier(name), Token::LeftParen) => !is_function(name),

        // 2x, 2 sin(x), xy, )x
        (Token::Number(_) | Token::Identifier(_) | Token::RightParen, Token::Identifier(_))
        // 2(x), )(
        | (Token::Number(_) | Token::RightParen, Token::LeftParen)
        // )2
        | (Token::RightParen, Token::Number(_)) => true,

        _ => false,
    }
}

/// Inserts a multiplication between every pair of adjacent tokens which can only be read as a
/// product. Names for which `is_function` holds are left alone when followed by `(`.
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Spanned>, is_function: impl Fn(&str) -> bool) -> Vec<Spanned> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let needs_mul = it
            .peek()
            .is_some_and(|next| should_insert_mul(&current.token, &next.token, &is_function));

        let position = current.position;
        result.push(current);
        if needs_mul {
            result.push(Spanned { token: Token::Operator(Operator::Mul), position });
        }
    }

    result
}
