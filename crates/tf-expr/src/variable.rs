//! The symbol every polynomial is expressed in.

use std::fmt;

use crate::error::{ExprError, ExprResult};
use crate::lexer::is_identifier;

/// Name of the loop (Laplace) variable, passed explicitly into every
/// evaluation instead of living in shared state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopVariable(String);

impl LoopVariable {
    pub const LAPLACE: &'static str = "s";

    pub fn new(name: impl Into<String>) -> ExprResult<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ExprError::InvalidVariable { name });
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for LoopVariable {
    fn default() -> Self {
        Self(Self::LAPLACE.to_string())
    }
}

impl fmt::Display for LoopVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_laplace() {
        assert_eq!(LoopVariable::default().name(), "s");
    }

    #[test]
    fn rejects_non_identifiers() {
        assert!(LoopVariable::new("z").is_ok());
        assert!(matches!(
            LoopVariable::new("1s"),
            Err(ExprError::InvalidVariable { .. })
        ));
        assert!(LoopVariable::new("").is_err());
    }
}
