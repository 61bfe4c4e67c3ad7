//! Where gathered temperature fields go.
//!
//! The coordinator hands every gathered global field to a
//! [`SnapshotSink`]. [`BmpWriter`] renders it as a false-colour bitmap,
//! [`MemorySink`] keeps it for inspection, and [`NullSink`] drops it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bmp;
pub mod colour;
pub mod error;
pub mod sink;

pub use bmp::{encode_bmp, render_image, BmpWriter};
pub use colour::heat_colour;
pub use error::OutputError;
pub use sink::{MemorySink, NullSink, SnapshotSink};
