//! tf-core: shared foundation for the tfloop workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{TfError, TfResult};
pub use numeric::*;
