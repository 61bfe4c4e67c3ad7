//! Rooted scatter and gather over strided regions.
//!
//! The root addresses each rank's share of a global buffer with one
//! [`StridedRegion`] per rank, indexed by rank. Non-root ranks see only
//! contiguous payloads. The root's own share never touches a channel.

use calor_core::Rank;
use calor_grid::StridedRegion;
use tracing::trace;

use crate::communicator::Communicator;
use crate::error::CommError;
use crate::tag::Tag;

fn check_regions<C: Communicator + ?Sized>(
    comm: &C,
    regions: &[StridedRegion],
) -> Result<(), CommError> {
    if regions.len() != comm.size() {
        return Err(CommError::RegionCount {
            expected: comm.size(),
            got: regions.len(),
        });
    }
    Ok(())
}

/// Root side of a scatter: send `regions[r]` of `src` to every rank `r`
/// and return the root's own share.
pub fn scatter_root<C: Communicator + ?Sized>(
    comm: &C,
    tag: Tag,
    src: &[f32],
    regions: &[StridedRegion],
) -> Result<Vec<f32>, CommError> {
    check_regions(comm, regions)?;
    let root = comm.rank();
    let mut own = Vec::new();
    for (r, region) in regions.iter().enumerate() {
        let packed = region.pack(src)?;
        if Rank(r) == root {
            own = packed;
        } else {
            trace!(%tag, dest = r, cells = packed.len(), "scatter");
            comm.send(Rank(r), tag, packed)?;
        }
    }
    Ok(own)
}

/// Non-root side of a scatter: receive exactly `len` cells from `root`.
pub fn scatter_recv<C: Communicator + ?Sized>(
    comm: &C,
    root: Rank,
    tag: Tag,
    len: usize,
) -> Result<Vec<f32>, CommError> {
    comm.recv_exact(root, tag, len)
}

/// Root side of a gather: place `own` and every other rank's payload into
/// `regions[r]` of `dst`.
///
/// Ranks are received in rank order; a payload whose length differs from
/// its region is rejected.
pub fn gather_root<C: Communicator + ?Sized>(
    comm: &C,
    tag: Tag,
    own: &[f32],
    dst: &mut [f32],
    regions: &[StridedRegion],
) -> Result<(), CommError> {
    check_regions(comm, regions)?;
    let root = comm.rank();
    for (r, region) in regions.iter().enumerate() {
        if Rank(r) == root {
            region.unpack(dst, own)?;
        } else {
            let payload = comm.recv_exact(Rank(r), tag, region.len())?;
            region.unpack(dst, &payload)?;
        }
    }
    Ok(())
}

/// Non-root side of a gather.
pub fn gather_send<C: Communicator + ?Sized>(
    comm: &C,
    root: Rank,
    tag: Tag,
    payload: Vec<f32>,
) -> Result<(), CommError> {
    comm.send(root, tag, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelComm;
    use std::thread;

    /// Four 2x2 quadrants of a 4x4 buffer, rank order (0,0) (0,1) (1,0) (1,1).
    fn quadrants() -> Vec<StridedRegion> {
        [0, 8, 2, 10]
            .into_iter()
            .map(|o| StridedRegion::new(o, 2, 4, 2))
            .collect()
    }

    #[test]
    fn scatter_then_gather_restores_buffer() {
        let src: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let regions = quadrants();
        let mut mesh = ChannelComm::mesh(4).into_iter();
        let root = mesh.next().unwrap();

        let handles: Vec<_> = mesh
            .map(|c| {
                thread::spawn(move || {
                    let mine = scatter_recv(&c, Rank::COORDINATOR, Tag::ScatterTemperature, 4)
                        .unwrap();
                    let doubled = mine.iter().map(|v| v * 2.0).collect();
                    gather_send(&c, Rank::COORDINATOR, Tag::Gather, doubled).unwrap();
                    mine
                })
            })
            .collect();

        let own = scatter_root(&root, Tag::ScatterTemperature, &src, &regions).unwrap();
        assert_eq!(own, vec![0.0, 1.0, 4.0, 5.0]);
        let own2: Vec<f32> = own.iter().map(|v| v * 2.0).collect();
        let mut dst = vec![0.0; 16];
        gather_root(&root, Tag::Gather, &own2, &mut dst, &regions).unwrap();

        let shares: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(shares[0], vec![8.0, 9.0, 12.0, 13.0]);
        assert_eq!(shares[1], vec![2.0, 3.0, 6.0, 7.0]);
        let expected: Vec<f32> = src.iter().map(|v| v * 2.0).collect();
        assert_eq!(dst, expected);
    }

    #[test]
    fn region_count_must_match_size() {
        let mesh = ChannelComm::mesh(2);
        let err = scatter_root(&mesh[0], Tag::ScatterMaterial, &[0.0; 4], &quadrants())
            .unwrap_err();
        assert_eq!(err, CommError::RegionCount { expected: 2, got: 4 });
    }

    #[test]
    fn short_gather_payload_rejected() {
        let mesh = ChannelComm::mesh(2);
        let regions = vec![
            StridedRegion::contiguous(0, 2),
            StridedRegion::contiguous(2, 2),
        ];
        gather_send(&mesh[1], Rank(0), Tag::Gather, vec![1.0]).unwrap();
        let mut dst = vec![0.0; 4];
        assert!(matches!(
            gather_root(&mesh[0], Tag::Gather, &[0.0, 0.0], &mut dst, &regions),
            Err(CommError::LengthMismatch { peer: Rank(1), .. })
        ));
    }
}
