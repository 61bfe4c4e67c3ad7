//! Error types for field storage.

use std::fmt;

use crate::layout::LayoutKind;

/// Errors arising from layout construction or field access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A layout was requested with a zero-sized interior.
    EmptyLayout {
        /// The layout being constructed.
        kind: LayoutKind,
    },
    /// A padded dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// The layout being constructed.
        kind: LayoutKind,
        /// The padded dimension that overflowed.
        value: u64,
        /// Largest supported padded dimension.
        max: u64,
    },
    /// A coordinate lies outside the layout, margin included.
    CoordOutOfBounds {
        /// The layout that was addressed.
        kind: LayoutKind,
        /// The offending x coordinate.
        x: i32,
        /// The offending y coordinate.
        y: i32,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A strided region reaches past the end of the buffer it addresses.
    RegionOutOfBounds {
        /// One past the last offset touched by the region.
        end: usize,
        /// Length of the buffer.
        len: usize,
    },
    /// A packed buffer does not match the size of its region.
    LengthMismatch {
        /// Number of elements the region holds.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
    /// The allocator refused the storage for a field.
    AllocationFailed {
        /// The layout being allocated.
        kind: LayoutKind,
        /// Number of `f32` cells requested.
        cells: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLayout { kind } => write!(f, "{kind} layout must have at least one cell"),
            Self::DimensionTooLarge { kind, value, max } => {
                write!(f, "{kind} dimension {value} exceeds maximum {max}")
            }
            Self::CoordOutOfBounds { kind, x, y, bounds } => {
                write!(f, "coordinate ({x}, {y}) out of bounds for {kind}: {bounds}")
            }
            Self::RegionOutOfBounds { end, len } => {
                write!(f, "region ends at offset {end} but buffer holds {len} cells")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "region holds {expected} cells, got {actual}")
            }
            Self::AllocationFailed { kind, cells } => {
                write!(f, "failed to allocate {cells} cells for {kind}")
            }
        }
    }
}

impl std::error::Error for GridError {}
