//! Per-worker numerics for the calor heat solver.
//!
//! One step on one worker, in order:
//!
//! 1. [`HeatSource::inject`] pins heater cells in the current buffer.
//! 2. [`HaloPlan::exchange`] refreshes the halo from the neighbours.
//! 3. [`EdgeBoundary::apply`] fills halo faces on the world edge.
//! 4. [`update`] writes the next buffer from the current one.
//!
//! The caller then swaps the [`DoubleBuffer`](calor_grid::DoubleBuffer).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod halo;
pub mod source;
pub mod stencil;

pub use boundary::EdgeBoundary;
pub use error::SolverError;
pub use halo::{HaloPlan, HaloStats};
pub use source::HeatSource;
pub use stencil::{ftcs_update, update};
