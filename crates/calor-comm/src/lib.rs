//! Message passing between calor workers.
//!
//! The solver only needs a handful of primitives: tagged point-to-point
//! sends and receives of `f32` payloads, plus a scatter and a gather
//! rooted at one rank. [`Communicator`] captures them as a trait;
//! [`ChannelComm`] implements it over an in-process mesh of crossbeam
//! channels, one per ordered pair of ranks.
//!
//! # Ordering
//!
//! Each ordered pair `(src, dst)` has its own FIFO channel, so messages
//! between two ranks arrive in the order they were sent. Sends never
//! block (channels are unbounded); receives block until a message from
//! the named source arrives.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod collective;
pub mod communicator;
pub mod error;
pub mod tag;

pub use channel::ChannelComm;
pub use collective::{gather_root, gather_send, scatter_recv, scatter_root};
pub use communicator::Communicator;
pub use error::CommError;
pub use tag::{Message, Tag};
