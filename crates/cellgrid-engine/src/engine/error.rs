//! Formula and cell error types.

use thiserror::Error;

/// Errors raised while turning formula text into an expression tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Empty formula")]
    Empty,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Operator is missing an operand")]
    MissingOperand,

    #[error("Operands without an operator between them")]
    TrailingOperands,

    #[error("Unsupported operator: '{0}'")]
    UnsupportedOperator(char),

    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
}

/// Error conditions shown in place of a formula cell's value.
///
/// The `Display` output is the sentinel string stored as the cell value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    #[error("!(invalid formula)")]
    Parse,

    #[error("!(bad reference)")]
    Reference,

    #[error("!(circular reference)")]
    Circular,
}

impl From<FormulaError> for CellError {
    fn from(_: FormulaError) -> Self {
        CellError::Parse
    }
}
