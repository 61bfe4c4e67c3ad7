//! Worker topology and domain partitioning for the calor heat solver.
//!
//! [`CartesianTopology`] arranges `n` workers on a balanced 2-D
//! [`ProcessGrid`] and resolves each worker's four axis [`Neighbours`]
//! (none across the outer edge: the topology does not wrap).
//! [`PartitionPlan`] splits the global grid into equal [`Subdomain`]s and
//! derives the [`DisplacementTable`] and strided regions that scatter and
//! gather use.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod partition;
pub mod topology;

pub use error::TopologyError;
pub use partition::{Displacement, DisplacementTable, PartitionPlan, Subdomain, TopologyDescriptor};
pub use topology::{CartCoord, CartesianTopology, Neighbours, ProcessGrid};
