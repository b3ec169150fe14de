//! Expression trees built from formula text.
//!
//! Building runs the full pipeline: [`tokenize`] -> [`to_postfix`] -> tree
//! construction. Cell references become [`Node::Variable`]s whose names are
//! collected so the caller can resolve them and supply values before calling
//! [`ExpressionTree::evaluate`].

use std::collections::HashMap;

use super::error::FormulaError;
use super::node::Node;
use super::operator::OperatorRegistry;
use super::postfix::to_postfix;
use super::token::{Token, tokenize};

/// A parsed formula plus the values of the cells it references.
#[derive(Clone, Debug)]
pub struct ExpressionTree {
    expression: String,
    root: Node,
    /// Referenced names in first-occurrence order.
    variables: Vec<String>,
    values: HashMap<String, f64>,
}

impl ExpressionTree {
    /// Parse `expression` with the standard `+ - * /` operators.
    pub fn new(expression: &str) -> Result<Self, FormulaError> {
        Self::with_registry(expression, &OperatorRegistry::standard())
    }

    /// Parse `expression` using the operators in `registry`.
    pub fn with_registry(expression: &str, registry: &OperatorRegistry) -> Result<Self, FormulaError> {
        let tokens = tokenize(expression, registry);
        let postfix = to_postfix(tokens, registry)?;

        let mut variables = Vec::new();
        let root = build_from_postfix(postfix, registry, &mut variables)?;
        let values = variables.iter().map(|name| (name.clone(), 0.0)).collect();

        Ok(ExpressionTree {
            expression: expression.to_string(),
            root,
            variables,
            values,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Names of the cells the formula reads, without duplicates.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Supply the value of a referenced cell.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn evaluate(&self) -> f64 {
        self.root.evaluate(&self.values)
    }
}

fn build_from_postfix(
    postfix: Vec<Token>,
    registry: &OperatorRegistry,
    variables: &mut Vec<String>,
) -> Result<Node, FormulaError> {
    let mut stack: Vec<Node> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(text.clone()))?;
                stack.push(Node::Constant(value));
            }
            Token::Operator(symbol) => {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(FormulaError::MissingOperand);
                };
                stack.push(registry.create(symbol, left, right)?);
            }
            Token::CellRef(name) => {
                if !variables.contains(&name) {
                    variables.push(name.clone());
                }
                stack.push(Node::Variable(name));
            }
            Token::LeftParen | Token::RightParen => {
                return Err(FormulaError::UnbalancedParentheses);
            }
        }
    }

    let root = stack.pop().ok_or(FormulaError::Empty)?;
    if !stack.is_empty() {
        return Err(FormulaError::TrailingOperands);
    }
    Ok(root)
}
