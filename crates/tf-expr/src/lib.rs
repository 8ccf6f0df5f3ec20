//! Term expressions: named constants, whole-word substitution, and a small
//! arithmetic evaluator over the loop variable.
//!
//! The evaluation pipeline for a single term is
//!
//! 1. [`substitute`] replaces every known constant name with its value,
//! 2. [`evaluate`] parses the result with a dedicated grammar
//!    (numbers, the loop variable, `+ - * / ^`, parentheses) and computes a
//!    [`Value`].
//!
//! Nothing here executes arbitrary code: any identifier other than the loop
//! variable that survives substitution is reported as unresolved.

pub mod constants;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod substitute;
pub mod variable;

pub use constants::ConstantTable;
pub use error::{ConstantError, ConstantResult, ExprError, ExprResult};
pub use eval::{Value, evaluate};
pub use lexer::is_identifier;
pub use parser::{BinaryOp, Expr};
pub use substitute::substitute;
pub use variable::LoopVariable;
