//! Error types for topology construction and partitioning.

use std::fmt;

use calor_core::Rank;
use calor_grid::GridError;

/// Errors arising from building a worker topology or partition plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// A topology needs at least one worker.
    NoWorkers,
    /// The global grid has a zero dimension.
    EmptyGrid {
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A grid axis does not divide evenly among the workers on that axis.
    IndivisibleGrid {
        /// `"x"` or `"y"`.
        axis: &'static str,
        /// Grid cells along the axis.
        cells: u32,
        /// Workers along the axis.
        procs: usize,
    },
    /// A rank outside `0..size` was addressed.
    UnknownRank {
        /// The offending rank.
        rank: Rank,
        /// Number of workers in the topology.
        size: usize,
    },
    /// A layout or region derived from the plan was invalid.
    Grid(GridError),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => write!(f, "topology needs at least one worker"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid {width}x{height} has no cells")
            }
            Self::IndivisibleGrid { axis, cells, procs } => write!(
                f,
                "grid {axis} extent {cells} is not divisible by {procs} workers along {axis}"
            ),
            Self::UnknownRank { rank, size } => {
                write!(f, "rank {rank} outside topology of {size} workers")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl std::error::Error for TopologyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for TopologyError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
