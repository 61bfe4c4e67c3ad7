//! Equal-block decomposition of the global grid across the topology.
//!
//! Every worker owns one `sub_w × sub_h` rectangle. Scatter and gather
//! address that rectangle inside the unbordered global temperature array
//! as a single strided block:
//!
//! ```text
//!  global temperature, W wide
//!  ┌────────┬────────┬────────┐
//!  │ (0,0)  │ (1,0)  │ (2,0)  │   sub_h rows of sub_w cells,
//!  ├────────┼────────┼────────┤   consecutive rows W apart
//!  │ (0,1)  │ (1,1)  │ (2,1)  │
//!  └────────┴────────┴────────┘
//!  displacement(cx, cy) = cy·sub_h·W + cx·sub_w
//! ```

use std::ops::Index;

use calor_core::Rank;
use calor_grid::{Layout, LayoutKind, StridedRegion, MATERIAL_MARGIN};

use crate::error::TopologyError;
use crate::topology::{CartCoord, CartesianTopology, Neighbours, ProcessGrid};

/// A worker's rectangle of the global grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subdomain {
    /// Global x of the top-left interior cell.
    pub x: u32,
    /// Global y of the top-left interior cell.
    pub y: u32,
    /// Cells across.
    pub width: u32,
    /// Cells down.
    pub height: u32,
}

impl Subdomain {
    /// `true` if global cell `(gx, gy)` lies inside this rectangle.
    pub fn contains(&self, gx: u32, gy: u32) -> bool {
        gx >= self.x && gy >= self.y && gx - self.x < self.width && gy - self.y < self.height
    }

    /// Local coordinate of global cell `(gx, gy)`, if it lies inside.
    pub fn to_local(&self, gx: u32, gy: u32) -> Option<(i32, i32)> {
        self.contains(gx, gy)
            .then(|| ((gx - self.x) as i32, (gy - self.y) as i32))
    }

    /// Global coordinate of local interior cell `(lx, ly)`.
    pub fn to_global(&self, lx: i32, ly: i32) -> (i64, i64) {
        (i64::from(self.x) + i64::from(lx), i64::from(self.y) + i64::from(ly))
    }

    /// Number of interior cells.
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Scatter/gather placement of one worker's block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Displacement {
    /// Offset of the block's first cell in the global temperature array.
    pub displacement: usize,
    /// Number of block-type elements sent. Always 1 for equal blocks.
    pub count: usize,
}

/// Per-rank [`Displacement`]s, indexable by [`Rank`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplacementTable {
    entries: Vec<Displacement>,
}

impl DisplacementTable {
    /// Number of entries, one per worker.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `rank`, if it exists.
    pub fn get(&self, rank: Rank) -> Option<&Displacement> {
        self.entries.get(rank.index())
    }

    /// All entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &Displacement)> {
        self.entries.iter().enumerate().map(|(i, d)| (Rank(i), d))
    }
}

impl Index<Rank> for DisplacementTable {
    type Output = Displacement;

    fn index(&self, rank: Rank) -> &Displacement {
        &self.entries[rank.index()]
    }
}

/// Immutable per-worker view of the decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopologyDescriptor {
    /// This worker.
    pub rank: Rank,
    /// Cartesian position.
    pub coords: CartCoord,
    /// Shape of the worker grid.
    pub grid: ProcessGrid,
    /// Axis neighbours.
    pub neighbours: Neighbours,
    /// Owned rectangle.
    pub subdomain: Subdomain,
}

/// Decomposition of a `width × height` grid over a [`CartesianTopology`].
#[derive(Clone, Debug)]
pub struct PartitionPlan {
    topology: CartesianTopology,
    width: u32,
    height: u32,
    sub_width: u32,
    sub_height: u32,
    table: DisplacementTable,
}

impl PartitionPlan {
    /// Plan the decomposition.
    ///
    /// Fails with [`TopologyError::EmptyGrid`] for a zero dimension and
    /// [`TopologyError::IndivisibleGrid`] when an axis does not split
    /// evenly over the workers on that axis.
    pub fn new(width: u32, height: u32, topology: CartesianTopology) -> Result<Self, TopologyError> {
        if width == 0 || height == 0 {
            return Err(TopologyError::EmptyGrid { width, height });
        }
        let grid = topology.grid();
        let sub_width = split_axis("x", width, grid.x_procs())?;
        let sub_height = split_axis("y", height, grid.y_procs())?;

        let mut entries = Vec::with_capacity(topology.size());
        for rank in topology.ranks() {
            let c = topology.coords(rank)?;
            entries.push(Displacement {
                displacement: c.y * sub_height as usize * width as usize
                    + c.x * sub_width as usize,
                count: 1,
            });
        }

        Ok(Self {
            topology,
            width,
            height,
            sub_width,
            sub_height,
            table: DisplacementTable { entries },
        })
    }

    /// The topology being partitioned.
    pub fn topology(&self) -> &CartesianTopology {
        &self.topology
    }

    /// Global grid `(width, height)`.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sub-domain `(width, height)`, equal for every worker.
    pub fn extent(&self) -> (u32, u32) {
        (self.sub_width, self.sub_height)
    }

    /// The scatter/gather table.
    pub fn displacements(&self) -> &DisplacementTable {
        &self.table
    }

    /// The rectangle owned by `rank`.
    pub fn subdomain(&self, rank: Rank) -> Result<Subdomain, TopologyError> {
        let c = self.topology.coords(rank)?;
        Ok(Subdomain {
            x: c.x as u32 * self.sub_width,
            y: c.y as u32 * self.sub_height,
            width: self.sub_width,
            height: self.sub_height,
        })
    }

    /// The block type: `sub_h` rows of `sub_w` cells, rows `W` apart,
    /// anchored at offset 0.
    pub fn block_type(&self) -> StridedRegion {
        StridedRegion::new(
            0,
            self.sub_width as usize,
            self.width as usize,
            self.sub_height as usize,
        )
    }

    /// `rank`'s block in the global temperature array.
    pub fn global_block(&self, rank: Rank) -> Result<StridedRegion, TopologyError> {
        let entry = self.table.get(rank).ok_or(TopologyError::UnknownRank {
            rank,
            size: self.table.len(),
        })?;
        Ok(self.block_type().displaced(entry.displacement))
    }

    /// `rank`'s sub-domain plus a [`MATERIAL_MARGIN`] ring, inside the
    /// bordered global material array.
    ///
    /// The ring reaches the global border on world-edge faces and the
    /// neighbouring sub-domain's cells elsewhere.
    pub fn material_window(
        &self,
        rank: Rank,
        global_material: &Layout,
    ) -> Result<StridedRegion, TopologyError> {
        if global_material.kind() != LayoutKind::GlobalMaterial
            || global_material.width() != self.width
            || global_material.height() != self.height
        {
            return Err(calor_grid::GridError::LengthMismatch {
                expected: Layout::global_material(self.width, self.height)?.len(),
                actual: global_material.len(),
            }
            .into());
        }
        let s = self.subdomain(rank)?;
        let m = MATERIAL_MARGIN;
        Ok(global_material.window(
            s.x as i32 - m as i32,
            s.y as i32 - m as i32,
            s.width + 2 * m,
            s.height + 2 * m,
        )?)
    }

    /// Layout of every worker's temperature buffers.
    pub fn local_temperature_layout(&self, border: u32) -> Result<Layout, TopologyError> {
        Ok(Layout::local_temperature(self.sub_width, self.sub_height, border)?)
    }

    /// Layout of every worker's material field.
    pub fn local_material_layout(&self) -> Result<Layout, TopologyError> {
        Ok(Layout::local_material(self.sub_width, self.sub_height)?)
    }

    /// Everything `rank` needs to know about its place in the decomposition.
    pub fn descriptor(&self, rank: Rank) -> Result<TopologyDescriptor, TopologyError> {
        Ok(TopologyDescriptor {
            rank,
            coords: self.topology.coords(rank)?,
            grid: self.topology.grid(),
            neighbours: self.topology.neighbours(rank)?,
            subdomain: self.subdomain(rank)?,
        })
    }
}

fn split_axis(axis: &'static str, cells: u32, procs: usize) -> Result<u32, TopologyError> {
    let p = u32::try_from(procs).map_err(|_| TopologyError::IndivisibleGrid { axis, cells, procs })?;
    if p > cells || cells % p != 0 {
        return Err(TopologyError::IndivisibleGrid { axis, cells, procs });
    }
    Ok(cells / p)
}
