//! Solver errors.

use std::fmt;

use calor_comm::CommError;
use calor_grid::{GridError, LayoutKind};

/// Errors from halo exchange or the stencil update.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// Two fields that must share an interior shape do not.
    ShapeMismatch {
        /// Operation that detected the mismatch.
        context: &'static str,
        /// Expected `(width, height)`.
        expected: (u32, u32),
        /// Actual `(width, height)`.
        actual: (u32, u32),
    },
    /// A field had no margin where the stencil needs one.
    NoMargin {
        /// Layout of the offending field.
        kind: LayoutKind,
    },
    /// Messaging with a neighbour failed.
    Comm(CommError),
    /// A strip region did not fit the field.
    Grid(GridError),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "{context}: expected {}x{} field, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::NoMargin { kind } => write!(f, "{kind} field has no margin"),
            Self::Comm(e) => write!(f, "communication: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Comm(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommError> for SolverError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}

impl From<GridError> for SolverError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
