//! Coordinate-to-offset mapping for the four field layouts.

use std::fmt;

use crate::error::GridError;
use crate::region::StridedRegion;

/// Margin around material fields, independent of the halo border width.
///
/// Material margins hold the coefficients just outside a (sub-)domain and
/// are never exchanged, so one cell always suffices for the 5-point stencil.
pub const MATERIAL_MARGIN: u32 = 1;

/// Which storage convention a [`Layout`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Whole-grid temperature on the coordinator, no margin.
    GlobalTemperature,
    /// Whole-grid material coefficients on the coordinator, one-cell margin.
    GlobalMaterial,
    /// Sub-domain material coefficients on a worker, one-cell margin.
    LocalMaterial,
    /// Sub-domain temperature on a worker, halo margin of the border width.
    LocalTemperature,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GlobalTemperature => "global temperature",
            Self::GlobalMaterial => "global material",
            Self::LocalMaterial => "local material",
            Self::LocalTemperature => "local temperature",
        };
        f.write_str(name)
    }
}

/// Row-major layout of a `width × height` interior surrounded by a margin.
///
/// Interior cells have coordinates `0..width` × `0..height`. Margin cells
/// are addressed with coordinates in `-margin..0` and
/// `width..width + margin` (likewise for `y`), so the cell just west of the
/// interior's first column is `x = -1` in every layout that has a margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    kind: LayoutKind,
    width: u32,
    height: u32,
    margin: u32,
    padded_width: usize,
    padded_height: usize,
}

impl Layout {
    /// Largest padded dimension: coordinates are `i32`.
    pub const MAX_DIM: u64 = i32::MAX as u64;

    /// Create a layout of the given kind.
    ///
    /// Returns `Err(GridError::EmptyLayout)` if either interior dimension
    /// is zero, or `Err(GridError::DimensionTooLarge)` if a padded
    /// dimension does not fit an `i32`.
    pub fn new(kind: LayoutKind, width: u32, height: u32, margin: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyLayout { kind });
        }
        for dim in [width, height] {
            let padded = u64::from(dim) + 2 * u64::from(margin);
            if padded > Self::MAX_DIM {
                return Err(GridError::DimensionTooLarge {
                    kind,
                    value: padded,
                    max: Self::MAX_DIM,
                });
            }
        }
        Ok(Self {
            kind,
            width,
            height,
            margin,
            padded_width: (width + 2 * margin) as usize,
            padded_height: (height + 2 * margin) as usize,
        })
    }

    /// Whole-grid temperature: no margin.
    pub fn global_temperature(width: u32, height: u32) -> Result<Self, GridError> {
        Self::new(LayoutKind::GlobalTemperature, width, height, 0)
    }

    /// Whole-grid material: [`MATERIAL_MARGIN`] cells of border.
    pub fn global_material(width: u32, height: u32) -> Result<Self, GridError> {
        Self::new(LayoutKind::GlobalMaterial, width, height, MATERIAL_MARGIN)
    }

    /// Sub-domain material: the same [`MATERIAL_MARGIN`] as the global material.
    pub fn local_material(width: u32, height: u32) -> Result<Self, GridError> {
        Self::new(LayoutKind::LocalMaterial, width, height, MATERIAL_MARGIN)
    }

    /// Sub-domain temperature with a halo margin of `border` cells.
    pub fn local_temperature(width: u32, height: u32, border: u32) -> Result<Self, GridError> {
        Self::new(LayoutKind::LocalTemperature, width, height, border)
    }

    /// The storage convention.
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Interior width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Interior height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Margin depth on every side.
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Row length including the margin: the stride between rows.
    pub fn padded_width(&self) -> usize {
        self.padded_width
    }

    /// Column length including the margin.
    pub fn padded_height(&self) -> usize {
        self.padded_height
    }

    /// Total number of stored cells, margin included.
    pub fn len(&self) -> usize {
        self.padded_width * self.padded_height
    }

    /// Always returns `false`: construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of interior cells.
    pub fn interior_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` if `(x, y)` addresses a stored cell, margin included.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let m = self.margin as i64;
        let (x, y) = (x as i64, y as i64);
        x >= -m && x < self.width as i64 + m && y >= -m && y < self.height as i64 + m
    }

    /// `true` if `(x, y)` is an interior cell.
    pub fn in_interior(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Linear offset of `(x, y)`.
    ///
    /// The coordinate must satisfy [`contains`](Self::contains); this is
    /// the hot-path accessor and only checks in debug builds. Use
    /// [`checked_index`](Self::checked_index) for untrusted input.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.contains(x, y),
            "({x}, {y}) outside {} layout {}x{} margin {}",
            self.kind,
            self.width,
            self.height,
            self.margin
        );
        let m = self.margin as i32;
        (y + m) as usize * self.padded_width + (x + m) as usize
    }

    /// Linear offset of `(x, y)`, or an error if it lies outside the layout.
    pub fn checked_index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            let m = self.margin as i64;
            return Err(GridError::CoordOutOfBounds {
                kind: self.kind,
                x,
                y,
                bounds: format!(
                    "[{}, {}) x [{}, {})",
                    -m,
                    self.width as i64 + m,
                    -m,
                    self.height as i64 + m
                ),
            });
        }
        Ok(self.index(x, y))
    }

    /// The `width × height` rectangle whose top-left cell is `(x, y)`.
    ///
    /// The rectangle may extend into the margin but not past it.
    pub fn window(&self, x: i32, y: i32, width: u32, height: u32) -> Result<StridedRegion, GridError> {
        if width == 0 || height == 0 {
            return Ok(StridedRegion::new(0, 0, self.padded_width, 0));
        }
        let origin = self.checked_index(x, y)?;
        self.checked_index(x + width as i32 - 1, y + height as i32 - 1)?;
        Ok(StridedRegion::new(
            origin,
            width as usize,
            self.padded_width,
            height as usize,
        ))
    }

    /// The interior as a strided region: `height` rows of `width` cells.
    pub fn interior(&self) -> StridedRegion {
        StridedRegion::new(
            self.index(0, 0),
            self.width as usize,
            self.padded_width,
            self.height as usize,
        )
    }

    /// The interior together with its whole margin.
    pub fn padded(&self) -> StridedRegion {
        StridedRegion::contiguous(0, self.len())
    }
}
