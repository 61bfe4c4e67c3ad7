use std::io;

use approx::assert_abs_diff_eq;
use calor_core::{Material, Rank, Step};
use calor_engine::{
    Cluster, ConfigError, PlateScenario, Scenario, SimConfig, SimError, UniformScenario,
};
use calor_grid::Field;
use calor_output::{MemorySink, NullSink, OutputError, SnapshotSink};
use calor_solver::{EdgeBoundary, HeatSource};
use calor_test_utils::coordinate_value;
use calor_topology::TopologyError;

/// Temperature encodes each cell's global coordinate; material is zero.
struct EncodedScenario;

impl Scenario for EncodedScenario {
    fn name(&self) -> &str {
        "encoded"
    }

    fn populate(&self, _config: &SimConfig, temperature: &mut Field, material: &mut Field) {
        let l = *temperature.layout();
        for y in 0..l.height() as i32 {
            for x in 0..l.width() as i32 {
                temperature.set(x, y, coordinate_value(x.into(), y.into()));
            }
        }
        material.fill(0.0);
    }

    fn heat_source(&self, _config: &SimConfig) -> Option<HeatSource> {
        None
    }
}

/// Cold plate with the standard heater and uniform coefficient.
struct HeaterOnly;

impl Scenario for HeaterOnly {
    fn name(&self) -> &str {
        "heater-only"
    }

    fn populate(&self, _config: &SimConfig, temperature: &mut Field, material: &mut Field) {
        temperature.fill(0.0);
        material.fill(0.2);
    }

    fn heat_source(&self, config: &SimConfig) -> Option<HeatSource> {
        Some(HeatSource::for_grid(config.width, config.height, 100.0))
    }
}

/// Uniform background with a few hot cells, for conservation checks.
struct Bumps;

impl Scenario for Bumps {
    fn name(&self) -> &str {
        "bumps"
    }

    fn populate(&self, _config: &SimConfig, temperature: &mut Field, material: &mut Field) {
        temperature.fill(20.0);
        temperature.set(1, 1, 95.0);
        temperature.set(7, 2, 70.0);
        temperature.set(4, 6, 55.0);
        material.fill(0.2);
    }

    fn heat_source(&self, _config: &SimConfig) -> Option<HeatSource> {
        None
    }
}

struct FailingSink;

impl SnapshotSink for FailingSink {
    fn write_snapshot(&mut self, _step: Step, _field: &Field) -> Result<(), OutputError> {
        Err(OutputError::Io {
            path: "unwritable".into(),
            source: io::Error::other("disk full"),
        })
    }
}

fn small(width: u32, height: u32, steps: u64) -> SimConfig {
    SimConfig {
        width,
        height,
        steps,
        heat_cutoff: steps / 2,
        snapshot_interval: 10,
        ..SimConfig::default()
    }
}

#[test]
fn zero_steps_round_trips_the_global_field() {
    for workers in [1, 2, 4, 6, 8] {
        let cluster = Cluster::new(small(24, 12, 0), workers).unwrap();
        let report = cluster.run(&EncodedScenario, Box::new(NullSink)).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.snapshots, 0);
        for y in 0..12 {
            for x in 0..24 {
                assert_eq!(
                    report.final_temperature.get(x, y),
                    coordinate_value(x.into(), y.into()),
                    "{workers} workers, cell ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn result_does_not_depend_on_worker_count() {
    for boundary in [EdgeBoundary::Insulated, EdgeBoundary::Fixed] {
        let config = SimConfig {
            boundary,
            ..small(24, 24, 40)
        };
        let reference = Cluster::new(config.clone(), 1)
            .unwrap()
            .run(&PlateScenario, Box::new(NullSink))
            .unwrap()
            .final_temperature;
        for workers in [2, 4, 6, 8] {
            let got = Cluster::new(config.clone(), workers)
                .unwrap()
                .run(&PlateScenario, Box::new(NullSink))
                .unwrap()
                .final_temperature;
            for (a, b) in reference.as_slice().iter().zip(got.as_slice()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-5);
            }
        }
    }
}

#[test]
fn snapshots_land_on_interval_multiples() {
    let config = SimConfig {
        snapshot_interval: 3,
        ..small(8, 8, 10)
    };
    let sink = MemorySink::new();
    let report = Cluster::new(config, 4)
        .unwrap()
        .run(&PlateScenario, Box::new(sink.clone()))
        .unwrap();
    assert_eq!(report.snapshots, 4);
    assert_eq!(sink.steps(), vec![Step(0), Step(3), Step(6), Step(9)]);
    // Every worker joins every snapshot gather plus the final one.
    assert!(report.per_worker.iter().all(|m| m.gathers == 5));
    assert_eq!(report.metrics.steps, 40);
}

#[test]
fn first_snapshot_is_the_initial_field() {
    let config = SimConfig {
        heat_cutoff: 0,
        ..small(16, 16, 1)
    };
    let sink = MemorySink::new();
    Cluster::new(config.clone(), 4)
        .unwrap()
        .run(&PlateScenario, Box::new(sink.clone()))
        .unwrap();
    let snaps = sink.snapshots();
    assert_eq!(snaps.len(), 1);
    let (step, field) = &snaps[0];
    assert_eq!(*step, Step(0));
    assert_eq!(field.get(0, 0), 20.0);
    assert_eq!(field.get(10, 2), 60.0);
    assert_eq!(field.get(8, 8), 100.0);
}

#[test]
fn heater_is_pinned_until_cutoff() {
    let config = SimConfig {
        heat_cutoff: 5,
        snapshot_interval: 2,
        ..small(16, 16, 12)
    };
    let heater = HeaterOnly.heat_source(&config).unwrap();
    let sink = MemorySink::new();
    let report = Cluster::new(config, 4)
        .unwrap()
        .run(&HeaterOnly, Box::new(sink.clone()))
        .unwrap();

    for (step, field) in sink.snapshots() {
        let heater_cells: Vec<f32> = (0..16u32)
            .flat_map(|y| (0..16u32).map(move |x| (x, y)))
            .filter(|&(x, y)| heater.contains(x, y))
            .map(|(x, y)| field.get(x as i32, y as i32))
            .collect();
        assert_eq!(heater_cells.len(), heater.cells());
        if step.0 < 5 {
            assert!(heater_cells.iter().all(|&v| v == 100.0), "step {step}");
        } else {
            assert!(heater_cells.iter().all(|&v| v < 100.0), "step {step}");
        }
    }
    assert_eq!(
        report.metrics.injected_cells,
        5 * heater.cells() as u64
    );
}

#[test]
fn insulated_run_conserves_heat_across_workers() {
    let config = SimConfig {
        boundary: EdgeBoundary::Insulated,
        ..small(8, 8, 150)
    };
    let initial = 20.0 * 61.0 + 95.0 + 70.0 + 55.0;
    for workers in [1, 4] {
        let report = Cluster::new(config.clone(), workers)
            .unwrap()
            .run(&Bumps, Box::new(NullSink))
            .unwrap();
        assert_abs_diff_eq!(
            report.final_temperature.interior_sum(),
            initial,
            epsilon = 1e-2
        );
    }
}

#[test]
fn fixed_boundary_leaks_heat_to_the_cool_surround() {
    let config = SimConfig {
        boundary: EdgeBoundary::Fixed,
        ..small(8, 8, 50)
    };
    let report = Cluster::new(config, 4)
        .unwrap()
        .run(
            &UniformScenario {
                temperature: 20.0,
                coefficient: 0.2,
            },
            Box::new(NullSink),
        )
        .unwrap();
    let corner = report.final_temperature.get(0, 0);
    assert!(corner < 20.0 && corner > 10.0);
    assert!(report.final_temperature.interior_sum() < 20.0 * 64.0);
}

#[test]
fn uniform_zero_material_is_a_fixed_point() {
    let report = Cluster::new(small(12, 12, 30), 6)
        .unwrap()
        .run(
            &UniformScenario {
                temperature: 42.0,
                coefficient: 0.0,
            },
            Box::new(NullSink),
        )
        .unwrap();
    assert!(report.final_temperature.as_slice().iter().all(|&v| v == 42.0));
}

#[test]
fn indivisible_grid_is_rejected_before_start() {
    let err = Cluster::new(small(10, 10, 1), 3).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Topology(TopologyError::IndivisibleGrid {
            axis: "x",
            cells: 10,
            procs: 3
        })
    );
    assert!(matches!(
        Cluster::new(small(8, 8, 1), 0),
        Err(ConfigError::Topology(TopologyError::NoWorkers))
    ));
}

#[test]
fn sink_failure_is_reported_from_the_coordinator() {
    let err = Cluster::new(small(8, 8, 5), 4)
        .unwrap()
        .run(&PlateScenario, Box::new(FailingSink))
        .unwrap_err();
    match err {
        SimError::WorkerFailed { rank, source } => {
            assert_eq!(rank, Rank(0));
            assert!(matches!(*source, SimError::Output(_)));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn halo_traffic_matches_neighbour_count() {
    // 2x2 workers: each has two neighbours.
    let report = Cluster::new(small(8, 8, 7), 4)
        .unwrap()
        .run(&PlateScenario, Box::new(NullSink))
        .unwrap();
    for m in &report.per_worker {
        assert_eq!(m.halo.messages_sent, 2 * 7);
        assert_eq!(m.halo.messages_received, 2 * 7);
        assert_eq!(m.halo.cells_sent, 2 * 4 * 7);
    }
    assert_eq!(
        Material::Copper.coefficient(0.0025, 0.05),
        SimConfig::default().coefficient(Material::Copper)
    );
}
