//! Expression tree nodes.

use std::collections::HashMap;

use super::operator::Operator;

/// A node of a parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Constant(f64),
    /// A cell reference, resolved through the variable map at evaluation time.
    Variable(String),
    Operator {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Evaluate the subtree. Variables missing from `variables` read as 0.
    pub fn evaluate(&self, variables: &HashMap<String, f64>) -> f64 {
        match self {
            Node::Constant(value) => *value,
            Node::Variable(name) => variables.get(name).copied().unwrap_or(0.0),
            Node::Operator { op, left, right } => {
                op.apply(left.evaluate(variables), right.evaluate(variables))
            }
        }
    }

    /// Operator precedence of this node, or None for operands.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Node::Operator { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::operator::{ADD, DIV, MUL, SUB};

    fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_constant_evaluates_to_literal() {
        assert_eq!(Node::Constant(4.5).evaluate(&HashMap::new()), 4.5);
    }

    #[test]
    fn test_missing_variable_defaults_to_zero() {
        let node = Node::Variable("B7".to_string());
        assert_eq!(node.evaluate(&HashMap::new()), 0.0);
    }

    #[test]
    fn test_variable_lookup() {
        let mut vars = HashMap::new();
        vars.insert("A1".to_string(), 12.0);
        let node = binary(MUL, Node::Variable("A1".to_string()), Node::Constant(2.0));
        assert_eq!(node.evaluate(&vars), 24.0);
    }

    #[test]
    fn test_nested_operators() {
        // (10 - 4) / (1 + 2)
        let node = binary(
            DIV,
            binary(SUB, Node::Constant(10.0), Node::Constant(4.0)),
            binary(ADD, Node::Constant(1.0), Node::Constant(2.0)),
        );
        assert_eq!(node.evaluate(&HashMap::new()), 2.0);
        assert_eq!(node.precedence(), Some(2));
        assert_eq!(Node::Constant(1.0).precedence(), None);
    }
}
