//! Error type for the command-line front end.

use tf_controls::ControlError;
use tf_spec::SpecError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Spec file error: {0}")]
    Spec(#[from] SpecError),

    #[error("Derivation failed: {0}")]
    Control(#[from] ControlError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
