//! In-memory description of one feedback loop.

use tf_expr::{ConstantTable, LoopVariable};

use crate::block::Block;
use crate::error::{ControlError, ControlResult};

/// Everything a derivation reads: the controller, the plant cascade, the
/// constants, and the loop variable the terms are written in.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunctionSpec {
    pub controller: Block,
    /// Plants in series, in signal order.
    pub plants: Vec<Block>,
    pub constants: ConstantTable,
    pub loop_variable: LoopVariable,
}

impl TransferFunctionSpec {
    /// Spec in the default Laplace variable `s`.
    pub fn new(controller: Block, plants: Vec<Block>, constants: ConstantTable) -> Self {
        Self {
            controller,
            plants,
            constants,
            loop_variable: LoopVariable::default(),
        }
    }

    pub fn with_loop_variable(mut self, loop_variable: LoopVariable) -> Self {
        self.loop_variable = loop_variable;
        self
    }

    /// Structural checks that do not need any term to be evaluated.
    pub fn validate(&self) -> ControlResult<()> {
        if self.constants.contains(self.loop_variable.name()) {
            return Err(ControlError::InvalidArg {
                what: "a constant shadows the loop variable",
            });
        }
        Ok(())
    }
}
