//! Communication errors.

use std::fmt;

use calor_core::Rank;
use calor_grid::GridError;

use crate::tag::Tag;

/// Errors from point-to-point messaging or collectives.
///
/// All of these are fatal for the worker that sees them; there is no
/// retry.
#[derive(Clone, Debug, PartialEq)]
pub enum CommError {
    /// The peer's end of the channel is gone, usually because its thread
    /// already failed.
    Disconnected {
        /// The peer that went away.
        peer: Rank,
    },
    /// A message arrived with a different tag than the receive expected.
    UnexpectedTag {
        /// Sender of the message.
        peer: Rank,
        /// Tag the receiver was waiting for.
        expected: Tag,
        /// Tag that arrived.
        got: Tag,
    },
    /// A payload had the wrong number of cells.
    LengthMismatch {
        /// Sender of the message.
        peer: Rank,
        /// Tag of the message.
        tag: Tag,
        /// Cells the receiver expected.
        expected: usize,
        /// Cells that arrived.
        got: usize,
    },
    /// A rank outside the communicator was addressed.
    UnknownPeer {
        /// The offending rank.
        peer: Rank,
        /// Number of ranks in the communicator.
        size: usize,
    },
    /// A collective was given a region list of the wrong length.
    RegionCount {
        /// Ranks in the communicator.
        expected: usize,
        /// Regions supplied.
        got: usize,
    },
    /// Packing or unpacking a region failed.
    Grid(GridError),
}

impl fmt::Display for CommError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { peer } => write!(f, "peer {peer} disconnected"),
            Self::UnexpectedTag {
                peer,
                expected,
                got,
            } => write!(f, "expected {expected} from peer {peer}, got {got}"),
            Self::LengthMismatch {
                peer,
                tag,
                expected,
                got,
            } => write!(
                f,
                "{tag} from peer {peer} carried {got} cells, expected {expected}"
            ),
            Self::UnknownPeer { peer, size } => {
                write!(f, "peer {peer} outside communicator of {size} ranks")
            }
            Self::RegionCount { expected, got } => {
                write!(f, "collective needs {expected} regions, got {got}")
            }
            Self::Grid(e) => write!(f, "region: {e}"),
        }
    }
}

impl std::error::Error for CommError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for CommError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
