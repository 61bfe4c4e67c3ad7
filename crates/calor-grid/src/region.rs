//! Strided region descriptors.
//!
//! A [`StridedRegion`] plays the role of a vector datatype: `block_count`
//! runs of `block_len` contiguous cells, consecutive runs `stride` cells
//! apart. Rows, columns, and rectangular sub-blocks of any layout are all
//! regions, so packing a halo column and packing a scatter block go
//! through the same two functions.

use std::ops::Range;

use crate::error::GridError;

/// `block_count` blocks of `block_len` contiguous elements, `stride` apart,
/// starting at `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StridedRegion {
    origin: usize,
    block_len: usize,
    stride: usize,
    block_count: usize,
}

impl StridedRegion {
    /// Create a region.
    ///
    /// `stride` must be at least `block_len` when there is more than one
    /// block, otherwise blocks would overlap.
    pub fn new(origin: usize, block_len: usize, stride: usize, block_count: usize) -> Self {
        debug_assert!(
            block_count <= 1 || stride >= block_len,
            "overlapping blocks: len {block_len}, stride {stride}"
        );
        Self {
            origin,
            block_len,
            stride,
            block_count,
        }
    }

    /// A single run of `len` contiguous elements.
    pub fn contiguous(origin: usize, len: usize) -> Self {
        Self::new(origin, len, len, 1)
    }

    /// Offset of the first element.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Elements per block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Distance between the starts of consecutive blocks.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Total number of elements addressed.
    pub fn len(&self) -> usize {
        self.block_len * self.block_count
    }

    /// `true` if the region addresses no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the last offset the region touches.
    pub fn end(&self) -> usize {
        if self.is_empty() {
            return self.origin;
        }
        self.origin + (self.block_count - 1) * self.stride + self.block_len
    }

    /// The same shape moved `displacement` elements further along.
    pub fn displaced(&self, displacement: usize) -> Self {
        Self {
            origin: self.origin + displacement,
            ..*self
        }
    }

    /// Offset ranges of each block, in order.
    pub fn blocks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.block_count).map(move |b| {
            let start = self.origin + b * self.stride;
            start..start + self.block_len
        })
    }

    /// Check that every addressed offset is below `len`.
    pub fn check(&self, len: usize) -> Result<(), GridError> {
        let end = self.end();
        if end > len {
            return Err(GridError::RegionOutOfBounds { end, len });
        }
        Ok(())
    }

    /// Copy the region out of `src` into a new contiguous buffer.
    pub fn pack(&self, src: &[f32]) -> Result<Vec<f32>, GridError> {
        self.check(src.len())?;
        let mut out = Vec::with_capacity(self.len());
        for block in self.blocks() {
            out.extend_from_slice(&src[block]);
        }
        Ok(out)
    }

    /// Copy a contiguous buffer produced by [`pack`](Self::pack) back into
    /// the region of `dst`.
    pub fn unpack(&self, dst: &mut [f32], packed: &[f32]) -> Result<(), GridError> {
        if packed.len() != self.len() {
            return Err(GridError::LengthMismatch {
                expected: self.len(),
                actual: packed.len(),
            });
        }
        self.check(dst.len())?;
        if self.block_len == 0 {
            return Ok(());
        }
        for (block, chunk) in self.blocks().zip(packed.chunks_exact(self.block_len)) {
            dst[block].copy_from_slice(chunk);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn column_pack_uses_stride() {
        // 4 wide, 3 tall buffer; second column.
        let src = ramp(12);
        let col = StridedRegion::new(1, 1, 4, 3);
        assert_eq!(col.pack(&src).unwrap(), vec![1.0, 5.0, 9.0]);
        assert_eq!(col.end(), 10);
    }

    #[test]
    fn block_pack_and_unpack_restore_cells() {
        let src = ramp(36);
        // 2x3 block at (1, 2) of a 6-wide buffer.
        let block = StridedRegion::new(2 * 6 + 1, 2, 6, 3);
        let packed = block.pack(&src).unwrap();
        assert_eq!(packed, vec![13.0, 14.0, 19.0, 20.0, 25.0, 26.0]);

        let mut dst = vec![0.0; 36];
        block.unpack(&mut dst, &packed).unwrap();
        for (i, v) in dst.iter().enumerate() {
            let inside = block.blocks().any(|r| r.contains(&i));
            assert_eq!(*v, if inside { i as f32 } else { 0.0 });
        }
    }

    #[test]
    fn out_of_bounds_region_is_an_error() {
        let src = ramp(10);
        let r = StridedRegion::new(5, 3, 4, 2);
        assert_eq!(
            r.pack(&src),
            Err(GridError::RegionOutOfBounds { end: 12, len: 10 })
        );
    }

    #[test]
    fn unpack_rejects_wrong_length() {
        let mut dst = vec![0.0; 8];
        let r = StridedRegion::contiguous(0, 4);
        assert_eq!(
            r.unpack(&mut dst, &[1.0, 2.0]),
            Err(GridError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn displaced_keeps_shape() {
        let r = StridedRegion::new(0, 4, 16, 4);
        let d = r.displaced(36);
        assert_eq!(d.origin(), 36);
        assert_eq!(d.len(), r.len());
        assert_eq!(d.stride(), 16);
    }

    #[test]
    fn empty_region_is_harmless() {
        let r = StridedRegion::new(3, 0, 4, 0);
        assert!(r.is_empty());
        assert_eq!(r.pack(&[]).unwrap_err(), GridError::RegionOutOfBounds { end: 3, len: 0 });
        assert_eq!(r.pack(&ramp(4)).unwrap(), Vec::<f32>::new());
    }
}
