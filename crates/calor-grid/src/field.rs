//! Owned, layout-aware cell storage.

use std::fmt::Write as _;

use crate::error::GridError;
use crate::layout::Layout;
use crate::region::StridedRegion;

/// A dense array of `f32` cells together with the [`Layout`] that gives
/// them coordinates.
///
/// Global and local fields are both `Field`s; the layout's kind tells
/// them apart and carries the margin convention, so every access goes
/// through `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    layout: Layout,
    data: Vec<f32>,
}

impl Field {
    /// Allocate a field with every cell, margin included, set to `value`.
    ///
    /// Storage is reserved fallibly: an allocator refusal surfaces as
    /// `Err(GridError::AllocationFailed)` instead of aborting.
    pub fn filled(layout: Layout, value: f32) -> Result<Self, GridError> {
        let cells = layout.len();
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| GridError::AllocationFailed {
                kind: layout.kind(),
                cells,
            })?;
        data.resize(cells, value);
        Ok(Self { layout, data })
    }

    /// Allocate a zero-filled field.
    pub fn zeroed(layout: Layout) -> Result<Self, GridError> {
        Self::filled(layout, 0.0)
    }

    /// The field's layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Value at `(x, y)`. Panics if the coordinate is outside the layout.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.data[self.layout.index(x, y)]
    }

    /// Overwrite the value at `(x, y)`. Panics if the coordinate is
    /// outside the layout.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        let i = self.layout.index(x, y);
        self.data[i] = value;
    }

    /// Value at `(x, y)`, or an error if the coordinate is outside the layout.
    pub fn try_get(&self, x: i32, y: i32) -> Result<f32, GridError> {
        Ok(self.data[self.layout.checked_index(x, y)?])
    }

    /// Raw storage, margin included.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw storage, margin included.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Set every stored cell, margin included.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Copy a region out into a contiguous buffer.
    pub fn pack(&self, region: &StridedRegion) -> Result<Vec<f32>, GridError> {
        region.pack(&self.data)
    }

    /// Copy a contiguous buffer into a region.
    pub fn unpack(&mut self, region: &StridedRegion, packed: &[f32]) -> Result<(), GridError> {
        region.unpack(&mut self.data, packed)
    }

    /// Interior cells in row-major order, margin dropped.
    pub fn interior(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.layout.interior_len());
        for block in self.layout.interior().blocks() {
            out.extend_from_slice(&self.data[block]);
        }
        out
    }

    /// Sum of the interior cells, accumulated in `f64`.
    pub fn interior_sum(&self) -> f64 {
        self.layout
            .interior()
            .blocks()
            .flat_map(|block| self.data[block].iter())
            .map(|&v| f64::from(v))
            .sum()
    }

    /// Fixed-width text dump, one row per line, for debugging small fields.
    pub fn render(&self, include_margin: bool) -> String {
        let m = if include_margin {
            self.layout.margin() as i32
        } else {
            0
        };
        let w = self.layout.width() as i32;
        let h = self.layout.height() as i32;
        let mut out = String::new();
        for y in -m..h + m {
            for x in -m..w + m {
                let _ = write!(out, "{:5.1} ", self.get(x, y));
            }
            out.push('\n');
        }
        out
    }
}
