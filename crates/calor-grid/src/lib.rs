//! Field storage for the calor heat solver.
//!
//! Four storage conventions exist side by side and are easy to confuse:
//!
//! | layout              | interior            | margin          |
//! |---------------------|---------------------|-----------------|
//! | global temperature  | grid                | none            |
//! | global material     | grid                | 1 cell          |
//! | local material      | sub-domain          | 1 cell          |
//! | local temperature   | sub-domain          | border width    |
//!
//! Each is a named [`Layout`]; a [`Field`] owns its data together with its
//! layout so callers address cells by `(x, y)` and never by hand-computed
//! offsets. Non-contiguous sub-regions (halo columns, scatter blocks) are
//! described once as a [`StridedRegion`], and the two temperature slots of a
//! worker live in a [`DoubleBuffer`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod field;
pub mod layout;
pub mod region;

pub use buffer::DoubleBuffer;
pub use error::GridError;
pub use field::Field;
pub use layout::{Layout, LayoutKind, MATERIAL_MARGIN};
pub use region::StridedRegion;
