use approx::assert_relative_eq;
use calor_comm::Communicator;
use calor_core::Direction;
use calor_grid::{DoubleBuffer, Field};
use calor_solver::{update, EdgeBoundary, HaloPlan};
use calor_test_utils::{coordinate_local, coordinate_value, run_on_mesh, uniform_material};
use calor_topology::{CartesianTopology, PartitionPlan};
use proptest::prelude::*;

const UNSET: f32 = -7.0;

/// After one exchange every margin strip facing a neighbour holds the true
/// global neighbour cell; every other margin cell is untouched.
fn check_halo_encoding(workers: usize, w: u32, h: u32) {
    let plan = PartitionPlan::new(w, h, CartesianTopology::for_workers(workers).unwrap()).unwrap();
    let failures = run_on_mesh(workers, |comm| {
        let desc = plan.descriptor(comm.rank()).unwrap();
        let sub = desc.subdomain;
        let mut field = coordinate_local(&sub, 1, UNSET);
        let halo = HaloPlan::new(*field.layout(), desc.neighbours).unwrap();
        let stats = halo.exchange(&comm, &mut field).unwrap();
        assert_eq!(stats.messages_sent, desc.neighbours.count() as u64);
        assert_eq!(stats.messages_received, desc.neighbours.count() as u64);

        let mut bad = Vec::new();
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let cells: Vec<(i32, i32)> = if dir.is_vertical() {
                let y = if dy < 0 { -1 } else { sub.height as i32 };
                (0..sub.width as i32).map(|x| (x, y)).collect()
            } else {
                let x = if dx < 0 { -1 } else { sub.width as i32 };
                (0..sub.height as i32).map(|y| (x, y)).collect()
            };
            for (x, y) in cells {
                let (gx, gy) = sub.to_global(x, y);
                let expected = if desc.neighbours.get(dir).is_some() {
                    coordinate_value(gx, gy)
                } else {
                    UNSET
                };
                if field.get(x, y) != expected {
                    bad.push((comm.rank(), x, y, field.get(x, y), expected));
                }
            }
        }
        for (x, y) in [(-1, -1), (sub.width as i32, sub.height as i32)] {
            if field.get(x, y) != UNSET {
                bad.push((comm.rank(), x, y, field.get(x, y), UNSET));
            }
        }
        bad
    });
    let failures: Vec<_> = failures.into_iter().flatten().collect();
    assert!(failures.is_empty(), "halo mismatches: {failures:?}");
}

#[test]
fn halo_two_by_two() {
    check_halo_encoding(4, 8, 8);
}

#[test]
fn halo_three_by_two() {
    check_halo_encoding(6, 9, 4);
}

#[test]
fn halo_single_row_of_workers() {
    check_halo_encoding(5, 10, 3);
}

#[test]
fn halo_single_worker_is_a_no_op() {
    check_halo_encoding(1, 4, 4);
}

#[test]
fn uniform_field_with_zero_material_never_changes() {
    let plan = PartitionPlan::new(8, 8, CartesianTopology::for_workers(4).unwrap()).unwrap();
    let results = run_on_mesh(4, |comm| {
        let desc = plan.descriptor(comm.rank()).unwrap();
        let layout = plan.local_temperature_layout(1).unwrap();
        let material = uniform_material(desc.subdomain.width, desc.subdomain.height, 0.0);
        let mut buf = DoubleBuffer::new(Field::filled(layout, 37.5).unwrap());
        let halo = HaloPlan::new(layout, desc.neighbours).unwrap();
        for _ in 0..25 {
            halo.exchange(&comm, buf.current_mut()).unwrap();
            EdgeBoundary::Insulated
                .apply(&halo, buf.current_mut())
                .unwrap();
            update(&mut buf, &material).unwrap();
            buf.swap();
        }
        buf.current().interior()
    });
    for interior in results {
        assert!(interior.iter().all(|&v| v == 37.5));
    }
}

#[test]
fn insulated_single_worker_conserves_heat() {
    let layout = calor_grid::Layout::local_temperature(6, 5, 1).unwrap();
    let mut start = Field::filled(layout, 20.0).unwrap();
    start.set(1, 1, 90.0);
    start.set(5, 4, 60.0);
    start.set(3, 0, 45.0);
    let total = start.interior_sum();
    let material = uniform_material(6, 5, 0.2);
    let mut buf = DoubleBuffer::new(start);
    let halo = HaloPlan::new(layout, Default::default()).unwrap();
    for _ in 0..200 {
        EdgeBoundary::Insulated
            .apply(&halo, buf.current_mut())
            .unwrap();
        update(&mut buf, &material).unwrap();
        buf.swap();
    }
    assert_relative_eq!(buf.current().interior_sum(), total, max_relative = 1e-5);
    // Diffusion flattens the bumps.
    let interior = buf.current().interior();
    let max = interior.iter().cloned().fold(f32::MIN, f32::max);
    assert!(max < 90.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn insulated_plate_conserves_any_initial_field(
        (w, h, cells) in (2u32..8, 2u32..8).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), prop::collection::vec(0.0f32..100.0, (w * h) as usize))
        }),
        coefficient in 0.0f32..=0.25,
        steps in 1usize..40,
    ) {
        let layout = calor_grid::Layout::local_temperature(w, h, 1).unwrap();
        let mut start = Field::zeroed(layout).unwrap();
        for y in 0..h {
            for x in 0..w {
                start.set(x as i32, y as i32, cells[(y * w + x) as usize]);
            }
        }
        let total = start.interior_sum();
        let material = uniform_material(w, h, coefficient);
        let halo = HaloPlan::new(layout, Default::default()).unwrap();
        let mut buf = DoubleBuffer::new(start);
        for _ in 0..steps {
            EdgeBoundary::Insulated.apply(&halo, buf.current_mut()).unwrap();
            update(&mut buf, &material).unwrap();
            buf.swap();
        }
        let interior = buf.current().interior();
        prop_assert!((buf.current().interior_sum() - total).abs() <= 1e-4 * total.max(1.0));
        // No new extremes under a stable coefficient.
        prop_assert!(interior.iter().all(|&v| (-1e-3..=100.001).contains(&v)));
    }
}
