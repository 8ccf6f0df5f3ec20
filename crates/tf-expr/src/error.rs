//! Error types for constants and expression evaluation.

use tf_core::TfError;
use thiserror::Error;

pub type ExprResult<T> = Result<T, ExprError>;
pub type ConstantResult<T> = Result<T, ConstantError>;

/// Failures while evaluating a term expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// An identifier that is neither a known constant nor the loop variable.
    #[error("Unresolved reference: {name}")]
    UnresolvedReference { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// The result would not be a polynomial in the loop variable.
    #[error("Not a polynomial: {what}")]
    NonPolynomial { what: &'static str },

    #[error("Invalid loop variable name: {name:?}")]
    InvalidVariable { name: String },

    #[error("Numeric error: {0}")]
    Numeric(#[from] TfError),
}

/// Failures while reading or updating a constant table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstantError {
    /// Lookup or update of a name the table does not hold.
    #[error("Unknown constant: {name}")]
    UnknownConstant { name: String },

    #[error("Invalid constant name: {name:?}")]
    InvalidName { name: String },

    #[error("Non-finite value for constant {name}: {value}")]
    NonFinite { name: String, value: f64 },

    #[error("Duplicate constant: {name}")]
    Duplicate { name: String },
}
