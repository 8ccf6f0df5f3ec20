//! Human-readable rendering of polynomials in a named loop variable.

use std::fmt;

use crate::polynomial::Polynomial;
use crate::rational::RationalFunction;

/// Borrowing formatter returned by [`Polynomial::display`].
pub struct PolynomialDisplay<'a> {
    poly: &'a Polynomial,
    variable: &'a str,
}

impl<'a> PolynomialDisplay<'a> {
    pub(crate) fn new(poly: &'a Polynomial, variable: &'a str) -> Self {
        Self { poly, variable }
    }
}

impl fmt::Display for PolynomialDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.poly.len();
        let mut wrote_any = false;

        for (i, &c) in self.poly.coeffs().iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = n - 1 - i;
            let magnitude = c.abs();

            if wrote_any {
                f.write_str(if c < 0.0 { " - " } else { " + " })?;
            } else if c < 0.0 {
                f.write_str("-")?;
            }

            // Unit coefficients are implied except on the constant term.
            let show_coeff = power == 0 || magnitude != 1.0;
            if show_coeff {
                write!(f, "{magnitude}")?;
            }
            match power {
                0 => {}
                1 if show_coeff => write!(f, " {}", self.variable)?,
                1 => write!(f, "{}", self.variable)?,
                p if show_coeff => write!(f, " {}^{p}", self.variable)?,
                p => write!(f, "{}^{p}", self.variable)?,
            }
            wrote_any = true;
        }

        if !wrote_any {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display("s"), f)
    }
}

/// Borrowing formatter returned by [`RationalFunction::display`].
pub struct RationalDisplay<'a> {
    rational: &'a RationalFunction,
    variable: &'a str,
}

impl<'a> RationalDisplay<'a> {
    pub(crate) fn new(rational: &'a RationalFunction, variable: &'a str) -> Self {
        Self { rational, variable }
    }
}

impl fmt::Display for RationalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) / ({})",
            self.rational.numerator().display(self.variable),
            self.rational.denominator().display(self.variable)
        )
    }
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display("s"), f)
    }
}
