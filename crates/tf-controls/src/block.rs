//! Controller and plant stages described by term lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One controller or plant stage: a numerator and a denominator term list.
///
/// Terms are listed by descending power of the loop variable, so
/// `den = ["T", "1"]` stands for `T s + 1`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Optional label used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

impl Block {
    /// Create a new block from numerator and denominator terms.
    pub fn new<N, D>(numerator: N, denominator: D) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            name: None,
            numerator: numerator.into_iter().map(Into::into).collect(),
            denominator: denominator.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a diagnostic label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Terms on one side of the fraction.
    pub fn terms(&self, side: Side) -> &[String] {
        match side {
            Side::Numerator => &self.numerator,
            Side::Denominator => &self.denominator,
        }
    }
}

/// Which side of a block's fraction a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Numerator,
    Denominator,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Numerator => write!(f, "numerator"),
            Side::Denominator => write!(f, "denominator"),
        }
    }
}

/// Position of a block in the loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockRef {
    Controller,
    /// Zero-based index into the plant cascade, with its label if any.
    Plant {
        index: usize,
        name: Option<String>,
    },
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Controller => write!(f, "controller"),
            BlockRef::Plant {
                index,
                name: Some(name),
            } => write!(f, "plant {index} ({name})"),
            BlockRef::Plant { index, name: None } => write!(f, "plant {index}"),
        }
    }
}

/// Exact term a derivation failure points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermLocation {
    pub block: BlockRef,
    pub side: Side,
    pub index: usize,
}

impl fmt::Display for TermLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} term {}", self.block, self.side, self.index)
    }
}
