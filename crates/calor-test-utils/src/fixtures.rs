//! Reusable field and mesh fixtures.

use std::thread;

use calor_comm::ChannelComm;
use calor_grid::{Field, Layout};
use calor_topology::Subdomain;

/// Value stored at global `(gx, gy)` by the coordinate fixtures.
///
/// Exact in `f32` for grids up to 1000 cells wide and 1600 tall.
pub fn coordinate_value(gx: i64, gy: i64) -> f32 {
    (gy * 10_000 + gx) as f32
}

/// A global temperature field whose cells hold [`coordinate_value`].
pub fn coordinate_global(width: u32, height: u32) -> Field {
    let layout = Layout::global_temperature(width, height).unwrap();
    let mut f = Field::zeroed(layout).unwrap();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            f.set(x, y, coordinate_value(x.into(), y.into()));
        }
    }
    f
}

/// A local temperature field for `sub` whose interior holds the
/// [`coordinate_value`] of each cell's global position and whose halo
/// holds `halo`.
pub fn coordinate_local(sub: &Subdomain, border: u32, halo: f32) -> Field {
    let layout = Layout::local_temperature(sub.width, sub.height, border).unwrap();
    let mut f = Field::filled(layout, halo).unwrap();
    for y in 0..sub.height as i32 {
        for x in 0..sub.width as i32 {
            let (gx, gy) = sub.to_global(x, y);
            f.set(x, y, coordinate_value(gx, gy));
        }
    }
    f
}

/// Local material field with every cell, margin included, set to `coef`.
pub fn uniform_material(width: u32, height: u32, coef: f32) -> Field {
    Field::filled(Layout::local_material(width, height).unwrap(), coef).unwrap()
}

/// Local temperature field at `background` with one cell at `value`.
pub fn hot_spot(width: u32, height: u32, at: (i32, i32), value: f32, background: f32) -> Field {
    let mut f = Field::filled(Layout::local_temperature(width, height, 1).unwrap(), background)
        .unwrap();
    f.set(at.0, at.1, value);
    f
}

/// Run `body` once per rank of a fresh `size`-rank mesh, each on its own
/// thread, and return the results in rank order.
pub fn run_on_mesh<T, F>(size: usize, body: F) -> Vec<T>
where
    T: Send,
    F: Fn(ChannelComm) -> T + Sync,
{
    thread::scope(|s| {
        let handles: Vec<_> = ChannelComm::mesh(size)
            .into_iter()
            .map(|comm| {
                let body = &body;
                s.spawn(move || body(comm))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}
