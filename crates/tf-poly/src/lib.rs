//! Polynomials and rational functions in a single loop variable.
//!
//! Coefficients are stored in **descending** power order:
//! `[a_n, a_{n-1}, ..., a_0]` represents `a_n s^n + ... + a_0`.
//! A coefficient list of length N spans powers N-1 down to 0, and the empty
//! list is the zero polynomial.
//!
//! No normalization happens implicitly. Leading zeros are kept until a caller
//! asks for [`Polynomial::trimmed`], and rational functions are never reduced.

pub mod display;
pub mod polynomial;
pub mod rational;

pub use display::{PolynomialDisplay, RationalDisplay};
pub use polynomial::Polynomial;
pub use rational::RationalFunction;
