//! Calor: distributed 2-D heat diffusion.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all calor sub-crates. A plate is split into equal rectangles, one per
//! worker; every worker advances its rectangle with an explicit
//! five-point stencil and trades one-cell halos with its four neighbours
//! each step.
//!
//! # Quick start
//!
//! ```rust
//! use calor::prelude::*;
//!
//! // 32×32 plate over a 2×2 worker grid.
//! let config = SimConfig {
//!     width: 32,
//!     height: 32,
//!     steps: 20,
//!     heat_cutoff: 10,
//!     snapshot_interval: 5,
//!     ..SimConfig::default()
//! };
//! let sink = MemorySink::new();
//! let report = Cluster::new(config, 4)
//!     .unwrap()
//!     .run(&PlateScenario, Box::new(sink.clone()))
//!     .unwrap();
//! assert_eq!(report.steps, 20);
//! assert_eq!(sink.steps(), vec![Step(0), Step(5), Step(10), Step(15)]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `calor-core` | ranks, steps, directions, materials |
//! | [`grid`] | `calor-grid` | layouts, fields, strided regions, double buffer |
//! | [`topology`] | `calor-topology` | process grid, neighbours, partition plan |
//! | [`comm`] | `calor-comm` | communicator trait, channel mesh, scatter/gather |
//! | [`solver`] | `calor-solver` | halo exchange, edge boundary, heater, stencil |
//! | [`output`] | `calor-output` | snapshot sinks and the BMP writer |
//! | [`engine`] | `calor-engine` | configuration, simulation state machine, launcher |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, directions and materials (`calor-core`).
pub use calor_core as types;

/// Grid indexing and field storage (`calor-grid`).
///
/// [`grid::Layout`] maps coordinates to offsets for the four layouts in
/// use; [`grid::StridedRegion`] describes the blocks and strips moved by
/// scatter, gather and halo exchange.
pub use calor_grid as grid;

/// Worker grid and domain decomposition (`calor-topology`).
pub use calor_topology as topology;

/// Point-to-point messaging and collectives (`calor-comm`).
///
/// Implement [`comm::Communicator`] to run over a transport other than the
/// in-process [`comm::ChannelComm`] mesh.
pub use calor_comm as comm;

/// Per-step numerics (`calor-solver`).
pub use calor_solver as solver;

/// Snapshot output (`calor-output`).
pub use calor_output as output;

/// Simulation driver (`calor-engine`).
///
/// [`engine::Cluster`] runs a whole job; [`engine::Simulation`] is the
/// per-rank state machine it drives.
pub use calor_engine as engine;

/// Common imports for typical calor usage.
///
/// ```rust
/// use calor::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use calor_core::{Direction, Material, Rank, Step};

    // Grid
    pub use calor_grid::{Field, Layout};

    // Topology
    pub use calor_topology::{CartesianTopology, PartitionPlan, Subdomain};

    // Solver
    pub use calor_solver::{EdgeBoundary, HeatSource};

    // Output
    pub use calor_output::{BmpWriter, MemorySink, NullSink, SnapshotSink};

    // Engine
    pub use calor_engine::{
        Cluster, ConfigError, PlateScenario, RunReport, Scenario, SimConfig, SimError,
        UniformScenario, WorkerMetrics,
    };
}
