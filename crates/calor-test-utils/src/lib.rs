//! Test fixtures for calor development.
//!
//! Fields that encode their own global coordinates (so a misplaced cell
//! names where it came from), small hand-built fields, and a helper that
//! runs a closure on every rank of a channel mesh.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
