//! Error types for transfer function derivation.

use thiserror::Error;

use tf_expr::{ConstantError, ExprError};

use crate::block::TermLocation;

/// Result type for derivation operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while deriving transfer functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a model or sweep function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Update or lookup of a constant that is not in the table.
    ///
    /// Non-fatal for updates: the table is left unchanged.
    #[error("Unknown constant: {name}")]
    UnknownConstant { name: String },

    /// Constant value or name rejected by the table.
    #[error("Invalid constant: {0}")]
    InvalidConstant(ConstantError),

    /// Identifier left over after substitution that is not the loop variable.
    #[error("Unresolved reference {name:?} in {location}")]
    UnresolvedReference { location: TermLocation, name: String },

    /// Malformed term, or a term that does not reduce to a scalar coefficient.
    #[error("Expression error in {location} ({expression:?}): {source}")]
    Expression {
        location: TermLocation,
        expression: String,
        source: ExprError,
    },
}

impl ControlError {
    /// True for conditions a caller may log and continue past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ControlError::UnknownConstant { .. })
    }
}

impl From<ConstantError> for ControlError {
    fn from(err: ConstantError) -> Self {
        match err {
            ConstantError::UnknownConstant { name } => ControlError::UnknownConstant { name },
            other => ControlError::InvalidConstant(other),
        }
    }
}
