//! Formula tokenizer.
//!
//! Splits a formula body (without the leading `=`) into numbers, cell
//! references, parentheses and operator symbols. Lexing is lenient:
//! whitespace and any character that is not part of a token is skipped.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::operator::OperatorRegistry;

/// A lexical token of a formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A decimal literal, kept as written.
    Number(String),
    /// A cell name such as `B12`.
    CellRef(String),
    Operator(char),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) | Token::CellRef(text) => f.write_str(text),
            Token::Operator(symbol) => write!(f, "{}", symbol),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?<number>[0-9]+(?:\.[0-9]+)?)|(?<cell>[A-Z][0-9]+)|(?<symbol>\S)")
            .expect("formula token regex must compile")
    })
}

/// Tokenize `expression`, recognizing the operator symbols in `registry`.
pub fn tokenize(expression: &str, registry: &OperatorRegistry) -> Vec<Token> {
    let mut tokens = Vec::new();

    for caps in token_re().captures_iter(expression) {
        if let Some(number) = caps.name("number") {
            tokens.push(Token::Number(number.as_str().to_string()));
        } else if let Some(cell) = caps.name("cell") {
            tokens.push(Token::CellRef(cell.as_str().to_string()));
        } else if let Some(symbol) = caps.name("symbol") {
            let Some(ch) = symbol.as_str().chars().next() else {
                continue;
            };
            match ch {
                '(' => tokens.push(Token::LeftParen),
                ')' => tokens.push(Token::RightParen),
                _ if registry.contains(ch) => tokens.push(Token::Operator(ch)),
                _ => log::trace!("skipping unrecognized character {:?} in formula", ch),
            }
        }
    }

    tokens
}

/// Render tokens separated by single spaces.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
