//! Cartesian arrangement of workers and neighbour resolution.

use calor_core::{Direction, Rank};
use smallvec::SmallVec;

use crate::error::TopologyError;

/// Shape of the 2-D worker grid: `x_procs` workers across by `y_procs` down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessGrid {
    x_procs: usize,
    y_procs: usize,
}

impl ProcessGrid {
    /// An explicit `x_procs × y_procs` shape.
    pub fn new(x_procs: usize, y_procs: usize) -> Result<Self, TopologyError> {
        if x_procs == 0 || y_procs == 0 {
            return Err(TopologyError::NoWorkers);
        }
        Ok(Self { x_procs, y_procs })
    }

    /// The most square factorization of `workers`, wider than tall.
    ///
    /// Picks the largest divisor `y ≤ √workers` and sets `x = workers / y`,
    /// so `x ≥ y` and both are as close as the factorization allows:
    /// 4 → 2×2, 6 → 3×2, 8 → 4×2, 12 → 4×3, 7 → 7×1.
    pub fn balanced(workers: usize) -> Result<Self, TopologyError> {
        if workers == 0 {
            return Err(TopologyError::NoWorkers);
        }
        let mut y = 1;
        let mut d = 1;
        while d * d <= workers {
            if workers % d == 0 {
                y = d;
            }
            d += 1;
        }
        Self::new(workers / y, y)
    }

    /// Workers along x.
    pub fn x_procs(&self) -> usize {
        self.x_procs
    }

    /// Workers along y.
    pub fn y_procs(&self) -> usize {
        self.y_procs
    }

    /// Total number of workers.
    pub fn size(&self) -> usize {
        self.x_procs * self.y_procs
    }
}

/// A worker's position in the [`ProcessGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CartCoord {
    /// Column of workers, `0..x_procs`.
    pub x: usize,
    /// Row of workers, `0..y_procs`.
    pub y: usize,
}

/// The four axis neighbours of one worker, `None` across the outer edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbours {
    slots: [Option<Rank>; 4],
}

impl Neighbours {
    /// Neighbour in `dir`, if any.
    pub fn get(&self, dir: Direction) -> Option<Rank> {
        self.slots[dir.index()]
    }

    /// Set or clear the neighbour in `dir`.
    pub fn set(&mut self, dir: Direction, rank: Option<Rank>) {
        self.slots[dir.index()] = rank;
    }

    /// Existing neighbours with their directions, in [`Direction::ALL`] order.
    pub fn present(&self) -> SmallVec<[(Direction, Rank); 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|r| (d, r)))
            .collect()
    }

    /// Number of existing neighbours.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Workers laid out on a non-periodic [`ProcessGrid`].
///
/// Ranks follow row-major cartesian order with the y coordinate varying
/// fastest: `rank = x · y_procs + y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartesianTopology {
    grid: ProcessGrid,
}

impl CartesianTopology {
    /// Topology over an explicit process grid.
    pub fn new(grid: ProcessGrid) -> Self {
        Self { grid }
    }

    /// Topology over the [balanced](ProcessGrid::balanced) grid for `workers`.
    pub fn for_workers(workers: usize) -> Result<Self, TopologyError> {
        Ok(Self::new(ProcessGrid::balanced(workers)?))
    }

    /// The process grid.
    pub fn grid(&self) -> ProcessGrid {
        self.grid
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Every rank in the topology.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> {
        (0..self.size()).map(Rank)
    }

    /// Cartesian coordinate of `rank`.
    pub fn coords(&self, rank: Rank) -> Result<CartCoord, TopologyError> {
        if rank.0 >= self.size() {
            return Err(TopologyError::UnknownRank {
                rank,
                size: self.size(),
            });
        }
        Ok(CartCoord {
            x: rank.0 / self.grid.y_procs,
            y: rank.0 % self.grid.y_procs,
        })
    }

    /// Rank at cartesian position `(x, y)`, or `None` outside the grid.
    pub fn rank_at(&self, x: i64, y: i64) -> Option<Rank> {
        if x < 0 || y < 0 || x >= self.grid.x_procs as i64 || y >= self.grid.y_procs as i64 {
            return None;
        }
        Some(Rank(x as usize * self.grid.y_procs + y as usize))
    }

    /// The worker one step from `rank` in `dir`, or `None` at the edge.
    pub fn neighbour(&self, rank: Rank, dir: Direction) -> Result<Option<Rank>, TopologyError> {
        let c = self.coords(rank)?;
        let (dx, dy) = dir.offset();
        Ok(self.rank_at(c.x as i64 + i64::from(dx), c.y as i64 + i64::from(dy)))
    }

    /// All four neighbours of `rank`.
    pub fn neighbours(&self, rank: Rank) -> Result<Neighbours, TopologyError> {
        let mut n = Neighbours::default();
        for dir in Direction::ALL {
            n.set(dir, self.neighbour(rank, dir)?);
        }
        Ok(n)
    }
}
