//! Infix to postfix conversion (shunting-yard).

use super::error::FormulaError;
use super::operator::OperatorRegistry;
use super::token::Token;

/// Reorder infix `tokens` into postfix order.
///
/// Operators of equal precedence associate to the left, so `a-b-c` becomes
/// `a b - c -`. Parentheses are consumed; any unmatched parenthesis is an
/// error.
pub fn to_postfix(tokens: Vec<Token>, registry: &OperatorRegistry) -> Result<Vec<Token>, FormulaError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::CellRef(_) => output.push(token),
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => output.push(top),
                    None => return Err(FormulaError::UnbalancedParentheses),
                }
            },
            Token::Operator(symbol) => {
                let precedence = registry
                    .get(symbol)
                    .map(|op| op.precedence())
                    .ok_or(FormulaError::UnsupportedOperator(symbol))?;
                while let Some(Token::Operator(top)) = stack.last() {
                    let top_precedence = registry.get(*top).map_or(0, |op| op.precedence());
                    if top_precedence < precedence {
                        break;
                    }
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Token::LeftParen {
            return Err(FormulaError::UnbalancedParentheses);
        }
        output.push(top);
    }

    Ok(output)
}
