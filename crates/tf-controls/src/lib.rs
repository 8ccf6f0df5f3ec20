//! Single-loop feedback derivation for a controller and cascaded plants.
//!
//! This crate turns a [`TransferFunctionSpec`] (constants plus per-block
//! numerator/denominator term lists) into polynomial pairs in the loop
//! variable:
//!
//! - `C(s)`: the controller,
//! - `P(s)`: the product of all plants in series,
//! - `L(s) = C(s) P(s)`: the open loop,
//! - `W(s) = L / (1 + L)`: the unity-feedback closed loop,
//! - `Ed(s) = P / (1 + L)`: the disturbance-to-output response.
//!
//! # Design Principles
//!
//! - **No caching**: every derived quantity is recomputed from the current
//!   constants, so an updated constant is always reflected.
//! - **Explicit loop variable**: carried by each [`TransferFunctionSpec`], never global.
//! - **Independent sweeps**: each sweep point derives from its own clone of
//!   the model.

pub mod block;
pub mod error;
pub mod model;
pub mod spec;
pub mod sweep;

pub use block::{Block, BlockRef, Side, TermLocation};
pub use error::{ControlError, ControlResult};
pub use model::{Derivation, TransferFunctionModel, build_polynomial};
pub use spec::TransferFunctionSpec;
pub use sweep::{SweepDefinition, SweepPoint, SweepResult, SweepSpacing, run_sweep};
