//! Core identifiers and material constants for the calor heat solver.
//!
//! Everything here is plain data shared by the other calor crates:
//! worker and step identifiers, the four cartesian [`Direction`]s, and the
//! [`Material`] table together with the one function that turns a
//! diffusivity into a stencil coefficient.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod id;
pub mod material;

pub use direction::Direction;
pub use id::{Rank, Step};
pub use material::{diffusion_coefficient, Material, STABILITY_LIMIT};
