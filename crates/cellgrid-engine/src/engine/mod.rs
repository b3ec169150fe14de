//! Spreadsheet engine API.
//!
//! This module provides the formula machinery for the spreadsheet:
//!
//! - [`tokenize`], [`to_postfix`] - Lexing and shunting-yard reordering
//! - [`Operator`], [`OperatorRegistry`] - Binary operators and the factory for their nodes
//! - [`Node`], [`ExpressionTree`] - Evaluable formula trees
//! - [`Cell`], [`Color`] - Cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation <-> row/col indices)
//! - [`DependencyGraph`], [`would_create_cycle`] - Dependency tracking and cycle detection
//! - [`format_number`] - Format results for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod expression;
mod format;
mod node;
mod operator;
mod postfix;
mod token;

pub use cell::{Cell, Color};
pub use cell_ref::{CellRef, MAX_COLUMNS};
pub use cycle::{dependency_path, would_create_cycle};
pub use deps::DependencyGraph;
pub use error::{CellError, FormulaError};
pub use expression::ExpressionTree;
pub use format::{format_number, parse_operand};
pub use node::Node;
pub use operator::{ADD, DIV, MUL, Operator, OperatorRegistry, SUB};
pub use postfix::to_postfix;
pub use token::{Token, join_tokens, tokenize};
