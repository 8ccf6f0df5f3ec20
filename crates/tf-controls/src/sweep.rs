//! Parameter sweeps over a single constant.
//!
//! Each point derives from its own clone of the model, so points never
//! observe each other's constant values and may run in parallel.

use std::fmt;

use rayon::prelude::*;
use tf_core::Real;
use tracing::{debug, warn};

use crate::error::{ControlError, ControlResult};
use crate::model::{Derivation, TransferFunctionModel};

/// Point spacing of a generated sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepSpacing {
    Linear,
    Logarithmic,
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

/// Range of values to assign to one constant.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub constant: String,
    pub start: Real,
    pub end: Real,
    pub num_points: usize,
    pub spacing: SweepSpacing,
}

impl SweepDefinition {
    pub fn new(
        constant: impl Into<String>,
        start: Real,
        end: Real,
        num_points: usize,
        spacing: SweepSpacing,
    ) -> ControlResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        if num_points < 2 {
            return Err(ControlError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(ControlError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        if spacing == SweepSpacing::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "logarithmic sweep bounds must be positive",
            });
        }
        Ok(Self {
            constant: constant.into(),
            start,
            end,
            num_points,
            spacing,
        })
    }

    /// All values of the sweep; the last one is exactly `end`.
    pub fn generate_points(&self) -> Vec<Real> {
        let (lo, hi) = match self.spacing {
            SweepSpacing::Linear => (self.start, self.end),
            SweepSpacing::Logarithmic => (self.start.ln(), self.end.ln()),
        };
        let step = (hi - lo) / (self.num_points - 1) as Real;

        let mut points: Vec<Real> = (0..self.num_points)
            .map(|i| {
                let x = lo + i as Real * step;
                match self.spacing {
                    SweepSpacing::Linear => x,
                    SweepSpacing::Logarithmic => x.exp(),
                }
            })
            .collect();

        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sweep {} from {} to {} ({} points, {})",
            self.constant, self.start, self.end, self.num_points, self.spacing
        )
    }
}

/// Outcome at one sweep value.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub value: Real,
    pub result: ControlResult<Derivation>,
}

/// Per-value derivations, in the order the values were given.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub constant: String,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn num_successful(&self) -> usize {
        self.points.iter().filter(|p| p.result.is_ok()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.points.len() - self.num_successful()
    }

    /// Values whose derivation succeeded.
    pub fn successful_values(&self) -> Vec<Real> {
        self.points
            .iter()
            .filter(|p| p.result.is_ok())
            .map(|p| p.value)
            .collect()
    }
}

/// Derive the loop at each of `values` assigned to `constant`.
///
/// The constant must exist in the model; otherwise nothing is evaluated.
/// A failure at one value is recorded in its [`SweepPoint`] and does not
/// stop the others. `model` itself is never modified.
pub fn run_sweep(
    model: &TransferFunctionModel,
    constant: &str,
    values: &[Real],
) -> ControlResult<SweepResult> {
    if !model.constants().contains(constant) {
        return Err(ControlError::UnknownConstant {
            name: constant.to_string(),
        });
    }
    debug!(constant, points = values.len(), "running sweep");

    let points: Vec<SweepPoint> = values
        .par_iter()
        .map(|&value| {
            let mut local = model.clone();
            let result = local
                .set_constant(constant, value)
                .and_then(|_| local.derive());
            SweepPoint { value, result }
        })
        .collect();

    let result = SweepResult {
        constant: constant.to_string(),
        points,
    };
    if result.num_failed() > 0 {
        warn!(
            constant,
            failed = result.num_failed(),
            successful = result.num_successful(),
            "sweep finished with failures"
        );
    }
    Ok(result)
}
