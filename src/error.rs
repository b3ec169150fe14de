//! Error types for the cellgrid command line

use thiserror::Error;

/// Problems with the command-line arguments
#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Invalid value for {option}: {value}")]
    InvalidNumber { option: String, value: String },

    #[error("Expected CELL=VALUE, got '{0}'")]
    InvalidAssignment(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),

    #[error("Invalid color '{0}': expected 8 hex digits (AARRGGBB)")]
    InvalidColor(String),
}
