//! Halo exchange between axis neighbours.
//!
//! A worker's local temperature layout has a one-cell margin. Each face
//! with a neighbour sends its outermost interior strip and receives the
//! neighbour's matching strip into the margin on that side:
//!
//! ```text
//!        recv N  (y = -1)
//!      ┌──────────────┐
//!  r W │ send N (y=0) │ r E
//!  x=-1│s            s│x=w
//!      │W            E│
//!      │ send S (h-1) │
//!      └──────────────┘
//!        recv S  (y = h)
//! ```
//!
//! Rows are contiguous; columns are strided by the padded width. All
//! sends go out before any receive, and sends never block, so no
//! ordering of workers can deadlock.

use calor_comm::{Communicator, Tag};
use calor_core::Direction;
use calor_grid::{Field, Layout, StridedRegion};
use calor_topology::Neighbours;
use tracing::debug;

use crate::error::SolverError;

/// Message and cell counts from one or more exchanges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HaloStats {
    /// Strips sent.
    pub messages_sent: u64,
    /// Strips received.
    pub messages_received: u64,
    /// Cells sent across all strips.
    pub cells_sent: u64,
}

impl HaloStats {
    /// Accumulate `other` into `self`.
    pub fn merge(&mut self, other: HaloStats) {
        self.messages_sent += other.messages_sent;
        self.messages_received += other.messages_received;
        self.cells_sent += other.cells_sent;
    }
}

/// Precomputed strip regions for one worker's halo exchange.
#[derive(Clone, Debug)]
pub struct HaloPlan {
    layout: Layout,
    neighbours: Neighbours,
    send: [StridedRegion; 4],
    recv: [StridedRegion; 4],
}

impl HaloPlan {
    /// Build the plan for fields of `layout` with the given neighbours.
    ///
    /// `layout` must have a margin of at least one cell.
    pub fn new(layout: Layout, neighbours: Neighbours) -> Result<Self, SolverError> {
        if layout.margin() == 0 {
            return Err(SolverError::NoMargin {
                kind: layout.kind(),
            });
        }
        let (w, h) = (layout.width(), layout.height());
        let (wi, hi) = (w as i32, h as i32);
        let strip = |dir: Direction, outward: bool| -> Result<StridedRegion, SolverError> {
            let r = match (dir, outward) {
                (Direction::North, false) => layout.window(0, 0, w, 1),
                (Direction::South, false) => layout.window(0, hi - 1, w, 1),
                (Direction::West, false) => layout.window(0, 0, 1, h),
                (Direction::East, false) => layout.window(wi - 1, 0, 1, h),
                (Direction::North, true) => layout.window(0, -1, w, 1),
                (Direction::South, true) => layout.window(0, hi, w, 1),
                (Direction::West, true) => layout.window(-1, 0, 1, h),
                (Direction::East, true) => layout.window(wi, 0, 1, h),
            };
            Ok(r?)
        };
        let mut send = [StridedRegion::contiguous(0, 0); 4];
        let mut recv = send;
        for dir in Direction::ALL {
            send[dir.index()] = strip(dir, false)?;
            recv[dir.index()] = strip(dir, true)?;
        }
        debug!(
            width = w,
            height = h,
            neighbours = neighbours.count(),
            "halo plan built"
        );
        Ok(Self {
            layout,
            neighbours,
            send,
            recv,
        })
    }

    /// Layout the plan was built for.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Neighbours the plan exchanges with.
    pub fn neighbours(&self) -> &Neighbours {
        &self.neighbours
    }

    /// Outermost interior strip on the `dir` face.
    pub fn send_region(&self, dir: Direction) -> StridedRegion {
        self.send[dir.index()]
    }

    /// Margin strip just outside the `dir` face.
    pub fn recv_region(&self, dir: Direction) -> StridedRegion {
        self.recv[dir.index()]
    }

    fn check(&self, field: &Field) -> Result<(), SolverError> {
        let l = field.layout();
        if l != &self.layout {
            return Err(SolverError::ShapeMismatch {
                context: "halo exchange",
                expected: (self.layout.width(), self.layout.height()),
                actual: (l.width(), l.height()),
            });
        }
        Ok(())
    }

    /// Exchange one-cell halos with every neighbour.
    ///
    /// On return every margin strip facing a neighbour holds that
    /// neighbour's current border. Faces without a neighbour are left
    /// untouched.
    pub fn exchange<C: Communicator + ?Sized>(
        &self,
        comm: &C,
        field: &mut Field,
    ) -> Result<HaloStats, SolverError> {
        self.check(field)?;
        let present = self.neighbours.present();
        let mut stats = HaloStats::default();
        for &(dir, peer) in &present {
            let strip = field.pack(&self.send[dir.index()])?;
            stats.cells_sent += strip.len() as u64;
            comm.send(peer, Tag::Halo(dir), strip)?;
            stats.messages_sent += 1;
        }
        for &(dir, peer) in &present {
            let region = &self.recv[dir.index()];
            // The strip from our `dir` neighbour travelled the opposite way.
            let strip = comm.recv_exact(peer, Tag::Halo(dir.opposite()), region.len())?;
            field.unpack(region, &strip)?;
            stats.messages_received += 1;
        }
        Ok(stats)
    }
}
