//! Numerator/denominator polynomial pairs.

use tf_core::Tolerances;

use crate::display::RationalDisplay;
use crate::polynomial::Polynomial;

/// Rational function `numerator / denominator`.
///
/// Never reduced: common factors stay in both polynomials.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RationalFunction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl RationalFunction {
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `[1] / [1]`, the starting point of a cascade.
    pub fn identity() -> Self {
        Self::new(Polynomial::one(), Polynomial::one())
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn into_parts(self) -> (Polynomial, Polynomial) {
        (self.numerator, self.denominator)
    }

    /// Series connection: numerators multiply together, denominators together.
    pub fn cascade(&self, next: &Self) -> Self {
        Self::new(
            &self.numerator * &next.numerator,
            &self.denominator * &next.denominator,
        )
    }

    /// Numerator of `1 + self` over the shared denominator: `den + num`.
    pub fn return_difference(&self) -> Polynomial {
        &self.denominator + &self.numerator
    }

    /// Unity negative feedback around `self`: `num / (den + num)`.
    pub fn unity_feedback(&self) -> Self {
        Self::new(self.numerator.clone(), self.return_difference())
    }

    /// True when the denominator has no nonzero coefficient.
    ///
    /// Such a function is still constructible; any numeric use divides by zero.
    pub fn has_degenerate_denominator(&self) -> bool {
        self.denominator.is_zero()
    }

    pub fn approx_eq(&self, other: &Self, tol: Tolerances) -> bool {
        self.numerator.approx_eq(&other.numerator, tol)
            && self.denominator.approx_eq(&other.denominator, tol)
    }

    pub fn display<'a>(&'a self, variable: &'a str) -> RationalDisplay<'a> {
        RationalDisplay::new(self, variable)
    }
}

impl Default for RationalFunction {
    fn default() -> Self {
        Self::identity()
    }
}
