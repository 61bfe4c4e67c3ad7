//! Simulation driver for the calor heat solver.
//!
//! [`Cluster`] is the entry point: it validates a [`SimConfig`], plans the
//! decomposition, and runs one [`Simulation`] per worker on its own thread,
//! connected by a channel mesh. Each simulation moves through
//! [`SimState`]s `Uninitialized → Ready → Running → Finished`; the rank-0
//! [`Coordinator`] owns the global fields and the snapshot sink, every
//! other rank is a plain [`Worker`].
//!
//! ```no_run
//! use calor_engine::{Cluster, PlateScenario, SimConfig};
//! use calor_output::NullSink;
//!
//! let cluster = Cluster::new(SimConfig::default(), 4)?;
//! let report = cluster.run(&PlateScenario, Box::new(NullSink))?;
//! println!("{} steps in {:?}", report.steps, report.elapsed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod metrics;
pub mod role;
pub mod scenario;
pub mod simulation;

pub use cluster::{Cluster, RunReport};
pub use config::{ConfigError, MaterialTable, SimConfig, Temperatures};
pub use error::SimError;
pub use metrics::WorkerMetrics;
pub use role::{Collect, Collected, Coordinator, Distributed, Role, Worker};
pub use scenario::{PlateScenario, Scenario, UniformScenario};
pub use simulation::{LocalDomain, RankOutcome, SimState, Simulation};
