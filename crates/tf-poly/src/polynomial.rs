//! Dense polynomial with descending-power coefficients.

use std::ops::{Add, Mul, Neg, Sub};

use tf_core::{Real, Tolerances, nearly_equal_slices};

use crate::display::PolynomialDisplay;

/// Polynomial in the loop variable.
///
/// `coeffs[0]` multiplies the highest power. The length fixes the nominal
/// degree (`len - 1`) even when leading coefficients are zero.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polynomial {
    coeffs: Vec<Real>,
}

impl Polynomial {
    /// Create a polynomial from descending-power coefficients.
    pub fn new(coeffs: Vec<Real>) -> Self {
        Self { coeffs }
    }

    /// The zero polynomial (no coefficients).
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The multiplicative identity `[1]`.
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// Degree-0 polynomial.
    pub fn constant(value: Real) -> Self {
        Self {
            coeffs: vec![value],
        }
    }

    /// The loop variable itself, `[1, 0]`.
    pub fn variable() -> Self {
        Self {
            coeffs: vec![1.0, 0.0],
        }
    }

    /// Build a polynomial from an ordered list of evaluated terms.
    ///
    /// Term `i` of `N` becomes the coefficient of power `N - 1 - i`; an empty
    /// list yields the zero polynomial. Nothing is trimmed.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Real>,
    {
        Self {
            coeffs: terms.into_iter().collect(),
        }
    }

    /// Coefficients in descending power order.
    pub fn coeffs(&self) -> &[Real] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<Real> {
        self.coeffs
    }

    /// Number of stored coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// True when every coefficient is zero (including the empty list).
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }

    /// Highest power with a nonzero coefficient, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        let n = self.coeffs.len();
        self.coeffs
            .iter()
            .position(|c| *c != 0.0)
            .map(|first_nonzero| n - 1 - first_nonzero)
    }

    /// Coefficient of `s^power` (zero beyond the stored range).
    pub fn coefficient(&self, power: usize) -> Real {
        let n = self.coeffs.len();
        if power >= n {
            0.0
        } else {
            self.coeffs[n - 1 - power]
        }
    }

    /// The value of a polynomial that does not depend on the loop variable.
    ///
    /// Returns `None` when any power above zero has a nonzero coefficient.
    pub fn as_scalar(&self) -> Option<Real> {
        match self.degree() {
            None => Some(0.0),
            Some(0) => Some(self.coefficient(0)),
            Some(_) => None,
        }
    }

    /// Copy with leading zero coefficients removed.
    ///
    /// An all-zero polynomial trims to the empty (zero) polynomial.
    pub fn trimmed(&self) -> Self {
        let start = self
            .coeffs
            .iter()
            .position(|c| *c != 0.0)
            .unwrap_or(self.coeffs.len());
        Self {
            coeffs: self.coeffs[start..].to_vec(),
        }
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: Real) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c * factor).collect(),
        }
    }

    /// Repeated multiplication; `pow(0)` is `[1]`.
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        for _ in 0..exponent {
            result = &result * self;
        }
        result
    }

    /// Product of a sequence of polynomials, starting from `[1]`.
    pub fn product<'a, I>(polys: I) -> Self
    where
        I: IntoIterator<Item = &'a Polynomial>,
    {
        polys
            .into_iter()
            .fold(Self::one(), |acc, p| &acc * p)
    }

    /// Compare after trimming leading zeros, within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: Tolerances) -> bool {
        nearly_equal_slices(self.trimmed().coeffs(), other.trimmed().coeffs(), tol)
    }

    /// Render in the given loop variable, e.g. `2 s^2 + 3 s + 1`.
    pub fn display<'a>(&'a self, variable: &'a str) -> PolynomialDisplay<'a> {
        PolynomialDisplay::new(self, variable)
    }
}

impl From<Vec<Real>> for Polynomial {
    fn from(coeffs: Vec<Real>) -> Self {
        Self::new(coeffs)
    }
}

impl From<&[Real]> for Polynomial {
    fn from(coeffs: &[Real]) -> Self {
        Self::new(coeffs.to_vec())
    }
}

/// Power-aligned sum; the shorter operand is zero-padded on the high-degree
/// side, so the result has the longer operand's length.
fn add_aligned(a: &[Real], b: &[Real]) -> Vec<Real> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let offset = long.len() - short.len();
    let mut out = long.to_vec();
    for (i, c) in short.iter().enumerate() {
        out[offset + i] += c;
    }
    out
}

/// Convolution of two coefficient vectors; an empty operand gives an empty result.
fn convolve(a: &[Real], b: &[Real]) -> Vec<Real> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::new(add_aligned(&self.coeffs, &rhs.coeffs))
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::new(convolve(&self.coeffs, &rhs.coeffs))
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}
