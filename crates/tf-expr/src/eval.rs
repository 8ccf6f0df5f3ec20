//! Evaluation of substituted expressions into scalars or loop-variable polynomials.

use tf_core::{Real, ensure_finite};
use tf_poly::Polynomial;

use crate::error::{ExprError, ExprResult};
use crate::parser::{BinaryOp, Expr, parse};
use crate::variable::LoopVariable;

/// Largest exponent accepted on a loop-variable base.
pub const MAX_SYMBOLIC_EXPONENT: u32 = 64;

/// Result of evaluating a term expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain number.
    Scalar(Real),
    /// Polynomial that depends on the loop variable.
    Symbolic(Polynomial),
}

impl Value {
    pub fn as_scalar(&self) -> Option<Real> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Symbolic(_) => None,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    pub fn into_polynomial(self) -> Polynomial {
        match self {
            Value::Scalar(v) => Polynomial::constant(v),
            Value::Symbolic(p) => p,
        }
    }

    /// Collapse a polynomial that turned out to be constant back to a scalar.
    fn from_polynomial(poly: Polynomial) -> Self {
        match poly.as_scalar() {
            Some(v) => Value::Scalar(v),
            None => Value::Symbolic(poly.trimmed()),
        }
    }
}

/// Parse and evaluate `input`, treating `variable` as the only free symbol.
///
/// Any other identifier is an [`ExprError::UnresolvedReference`]; callers are
/// expected to have run [`crate::substitute`] first.
pub fn evaluate(input: &str, variable: &LoopVariable) -> ExprResult<Value> {
    let expr = parse(input)?;
    eval_expr(&expr, variable)
}

/// Evaluate an already parsed tree.
pub fn eval_expr(expr: &Expr, variable: &LoopVariable) -> ExprResult<Value> {
    match expr {
        Expr::Number(v) => Ok(Value::Scalar(ensure_finite(*v, "number literal")?)),
        Expr::Ident(name) if name == variable.name() => Ok(Value::Symbolic(Polynomial::variable())),
        Expr::Ident(name) => Err(ExprError::UnresolvedReference { name: name.clone() }),
        Expr::Neg(inner) => Ok(match eval_expr(inner, variable)? {
            Value::Scalar(v) => Value::Scalar(-v),
            Value::Symbolic(p) => Value::Symbolic(-p),
        }),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval_expr(lhs, variable)?;
            let rhs = eval_expr(rhs, variable)?;
            let value = apply(*op, lhs, rhs)?;
            match &value {
                Value::Scalar(v) => {
                    ensure_finite(*v, "expression result")?;
                }
                Value::Symbolic(p) => {
                    for c in p.coeffs() {
                        ensure_finite(*c, "expression coefficient")?;
                    }
                }
            }
            Ok(value)
        }
    }
}

fn apply(op: BinaryOp, lhs: Value, rhs: Value) -> ExprResult<Value> {
    use Value::{Scalar, Symbolic};

    match (op, lhs, rhs) {
        (BinaryOp::Add, Scalar(a), Scalar(b)) => Ok(Scalar(a + b)),
        (BinaryOp::Sub, Scalar(a), Scalar(b)) => Ok(Scalar(a - b)),
        (BinaryOp::Mul, Scalar(a), Scalar(b)) => Ok(Scalar(a * b)),
        (BinaryOp::Div, Scalar(a), Scalar(b)) => {
            if b == 0.0 {
                Err(ExprError::DivisionByZero)
            } else {
                Ok(Scalar(a / b))
            }
        }
        (BinaryOp::Pow, Scalar(a), Scalar(b)) => Ok(Scalar(a.powf(b))),

        (BinaryOp::Add, a, b) => Ok(Value::from_polynomial(
            &a.into_polynomial() + &b.into_polynomial(),
        )),
        (BinaryOp::Sub, a, b) => Ok(Value::from_polynomial(
            &a.into_polynomial() - &b.into_polynomial(),
        )),
        (BinaryOp::Mul, a, b) => Ok(Value::from_polynomial(
            &a.into_polynomial() * &b.into_polynomial(),
        )),
        (BinaryOp::Div, Symbolic(p), Scalar(d)) => {
            if d == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            let quotient = p.coeffs().iter().map(|c| c / d).collect::<Vec<_>>();
            Ok(Value::from_polynomial(Polynomial::new(quotient)))
        }
        (BinaryOp::Div, _, Symbolic(_)) => Err(ExprError::NonPolynomial {
            what: "division by an expression in the loop variable",
        }),
        (BinaryOp::Pow, _, Symbolic(_)) => Err(ExprError::NonPolynomial {
            what: "exponent depends on the loop variable",
        }),
        (BinaryOp::Pow, Symbolic(p), Scalar(e)) => {
            let is_whole = e >= 0.0 && e.fract() == 0.0;
            if !is_whole {
                return Err(ExprError::NonPolynomial {
                    what: "loop variable raised to a negative or fractional power",
                });
            }
            if e > Real::from(MAX_SYMBOLIC_EXPONENT) {
                return Err(ExprError::NonPolynomial {
                    what: "loop variable exponent too large",
                });
            }
            Ok(Value::from_polynomial(p.pow(e as u32)))
        }
    }
}
