//! Run-time errors.

use std::error::Error;
use std::fmt;

use calor_comm::CommError;
use calor_core::Rank;
use calor_grid::GridError;
use calor_output::OutputError;
use calor_solver::SolverError;
use calor_topology::TopologyError;

use crate::config::ConfigError;
use crate::simulation::SimState;

/// Errors from building or running a simulation.
#[derive(Debug)]
pub enum SimError {
    /// The configuration was rejected.
    Config(ConfigError),
    /// A rank could not be placed in the decomposition.
    Topology(TopologyError),
    /// A field could not be allocated or addressed.
    Grid(GridError),
    /// Scatter or gather failed.
    Comm(CommError),
    /// Halo exchange or the stencil failed.
    Solver(SolverError),
    /// The snapshot sink failed.
    Output(OutputError),
    /// An operation was called in a state that does not allow it.
    InvalidState {
        /// The operation.
        op: &'static str,
        /// The state the simulation was in.
        state: SimState,
    },
    /// A worker thread panicked.
    WorkerPanicked {
        /// The worker.
        rank: Rank,
    },
    /// A worker thread could not be started.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
    /// A worker returned an error; the first such error fails the run.
    WorkerFailed {
        /// The worker.
        rank: Rank,
        /// What went wrong on it.
        source: Box<SimError>,
    },
}

impl SimError {
    /// `true` if this error only reports that a peer went away.
    ///
    /// When one worker fails its peers see their channels close, so these
    /// are consequences rather than causes.
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::Comm(CommError::Disconnected { .. })
            | Self::Solver(SolverError::Comm(CommError::Disconnected { .. })) => true,
            Self::WorkerFailed { source, .. } => source.is_disconnect(),
            _ => false,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Topology(e) => write!(f, "topology: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Comm(e) => write!(f, "communication: {e}"),
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::InvalidState { op, state } => {
                write!(f, "cannot {op} while {state}")
            }
            Self::WorkerPanicked { rank } => write!(f, "worker {rank} panicked"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
            Self::WorkerFailed { rank, source } => write!(f, "worker {rank}: {source}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Topology(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Comm(e) => Some(e),
            Self::Solver(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::WorkerFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TopologyError> for SimError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

impl From<GridError> for SimError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<CommError> for SimError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}

impl From<SolverError> for SimError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl From<OutputError> for SimError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}
