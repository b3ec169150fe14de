//! Binary operators and the registry that builds operator nodes.
//!
//! The tokenizer, postfix converter and tree builder all consult an
//! [`OperatorRegistry`] instead of hard-coding symbols, so a new operator only
//! needs to be registered:
//!
//! ```
//! use cellgrid_engine::engine::{ExpressionTree, Operator, OperatorRegistry};
//!
//! let mut registry = OperatorRegistry::standard();
//! registry.register(Operator::new('^', 3, f64::powf));
//! let tree = ExpressionTree::with_registry("2^3*2", &registry).unwrap();
//! assert_eq!(tree.evaluate(), 16.0);
//! ```

use std::collections::HashMap;
use std::fmt;

use super::error::FormulaError;
use super::node::Node;

/// A binary operator: its symbol, binding strength and arithmetic.
#[derive(Clone, Copy)]
pub struct Operator {
    symbol: char,
    precedence: u8,
    apply: fn(f64, f64) -> f64,
}

impl Operator {
    pub const fn new(symbol: char, precedence: u8, apply: fn(f64, f64) -> f64) -> Self {
        Operator {
            symbol,
            precedence,
            apply,
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Higher binds tighter. Equal precedence associates to the left.
    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        (self.apply)(left, right)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("precedence", &self.precedence)
            .finish()
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.precedence == other.precedence
    }
}

fn add(left: f64, right: f64) -> f64 {
    left + right
}

fn sub(left: f64, right: f64) -> f64 {
    left - right
}

fn mul(left: f64, right: f64) -> f64 {
    left * right
}

// IEEE semantics: x/0 is +-inf, 0/0 is NaN.
fn div(left: f64, right: f64) -> f64 {
    left / right
}

pub const ADD: Operator = Operator::new('+', 1, add);
pub const SUB: Operator = Operator::new('-', 1, sub);
pub const MUL: Operator = Operator::new('*', 2, mul);
pub const DIV: Operator = Operator::new('/', 2, div);

/// Maps operator symbols to operators.
#[derive(Clone, Debug)]
pub struct OperatorRegistry {
    operators: HashMap<char, Operator>,
}

impl OperatorRegistry {
    /// An empty registry. Formulas parsed with it may only contain operands.
    pub fn empty() -> Self {
        OperatorRegistry {
            operators: HashMap::new(),
        }
    }

    /// The four arithmetic operators `+ - * /`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for op in [ADD, SUB, MUL, DIV] {
            registry.register(op);
        }
        registry
    }

    /// Add an operator, replacing any existing one with the same symbol.
    /// Parentheses, whitespace and alphanumerics are reserved; returns false
    /// if `op` uses one of them.
    pub fn register(&mut self, op: Operator) -> bool {
        let symbol = op.symbol;
        if matches!(symbol, '(' | ')' | '.') || symbol.is_alphanumeric() || symbol.is_whitespace() {
            log::warn!("refusing to register reserved operator symbol {:?}", symbol);
            return false;
        }
        self.operators.insert(symbol, op);
        true
    }

    pub fn get(&self, symbol: char) -> Option<&Operator> {
        self.operators.get(&symbol)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.operators.contains_key(&symbol)
    }

    /// Build an operator node for `symbol` over the given operands.
    pub fn create(&self, symbol: char, left: Node, right: Node) -> Result<Node, FormulaError> {
        let op = self
            .get(symbol)
            .copied()
            .ok_or(FormulaError::UnsupportedOperator(symbol))?;
        Ok(Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
