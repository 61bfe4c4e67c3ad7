//! Multi-worker launcher.
//!
//! # Architecture
//!
//! ```text
//!  caller ──run()──▶ thread::scope
//!                     ├── calor-rank-0  Simulation<Coordinator>  ─┐
//!                     ├── calor-rank-1  Simulation<Worker>        ├─ ChannelComm mesh
//!                     └── calor-rank-N  Simulation<Worker>       ─┘
//!                    join all ──▶ RunReport (or the root-cause error)
//! ```
//!
//! Every rank runs on its own named thread. A rank that fails drops its
//! endpoint, which disconnects every channel to it, so blocked peers fail
//! too instead of hanging. The launcher reports the first failure that is
//! not merely such a disconnect.

use std::thread;
use std::time::{Duration, Instant};

use calor_comm::{ChannelComm, Communicator};
use calor_core::Rank;
use calor_grid::Field;
use calor_output::SnapshotSink;
use calor_topology::PartitionPlan;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimConfig};
use crate::error::SimError;
use crate::metrics::WorkerMetrics;
use crate::role::{Coordinator, Worker};
use crate::scenario::Scenario;
use crate::simulation::{RankOutcome, Simulation};

/// Result of a successful [`Cluster::run`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Global temperature after the last step.
    pub final_temperature: Field,
    /// Steps taken.
    pub steps: u64,
    /// Snapshots written to the sink.
    pub snapshots: u64,
    /// Counters summed over every worker.
    pub metrics: WorkerMetrics,
    /// Counters per worker, in rank order.
    pub per_worker: Vec<WorkerMetrics>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

/// A validated configuration bound to a worker count.
#[derive(Clone, Debug)]
pub struct Cluster {
    config: SimConfig,
    plan: PartitionPlan,
}

impl Cluster {
    /// Validate `config` and plan the decomposition over `workers` workers.
    ///
    /// Logs a warning for every material whose coefficient exceeds the
    /// explicit-scheme stability limit; such runs are allowed.
    pub fn new(config: SimConfig, workers: usize) -> Result<Self, ConfigError> {
        let plan = config.plan(workers)?;
        for (material, coefficient) in config.unstable_materials() {
            warn!(
                %material,
                coefficient,
                limit = calor_core::STABILITY_LIMIT,
                "coefficient exceeds stability limit; the run may diverge"
            );
        }
        Ok(Self { config, plan })
    }

    /// The configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The decomposition.
    pub fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.plan.topology().size()
    }

    /// Run the configured number of steps from `scenario`'s initial state,
    /// writing snapshots to `sink`.
    pub fn run(
        &self,
        scenario: &dyn Scenario,
        sink: Box<dyn SnapshotSink>,
    ) -> Result<RunReport, SimError> {
        let started = Instant::now();
        let grid = self.plan.topology().grid();
        let (sub_w, sub_h) = self.plan.extent();
        info!(
            scenario = scenario.name(),
            width = self.config.width,
            height = self.config.height,
            workers = self.workers(),
            x_procs = grid.x_procs(),
            y_procs = grid.y_procs(),
            sub_width = sub_w,
            sub_height = sub_h,
            steps = self.config.steps,
            boundary = %self.config.boundary,
            "cluster starting"
        );

        let heat = scenario.heat_source(&self.config);
        let config = &self.config;
        let plan = &self.plan;
        let mut sink = Some(sink);

        let results: Vec<(Rank, Result<RankOutcome, SimError>)> = thread::scope(|s| {
            let mut handles = Vec::with_capacity(self.workers());
            let mut spawn_error = None;
            for comm in ChannelComm::mesh(self.workers()) {
                let rank = comm.rank();
                let builder = thread::Builder::new().name(format!("calor-rank-{rank}"));
                let spawned = if rank.is_coordinator() {
                    let sink = sink.take();
                    builder.spawn_scoped(s, move || -> Result<RankOutcome, SimError> {
                        let sink = sink.ok_or(SimError::InvalidState {
                            op: "run",
                            state: crate::SimState::Uninitialized,
                        })?;
                        let role = Coordinator::new(config, plan, scenario, sink)?;
                        let mut sim = Simulation::new(config, plan, role, comm, heat)?;
                        sim.run()?;
                        sim.finish()
                    })
                } else {
                    builder.spawn_scoped(s, move || -> Result<RankOutcome, SimError> {
                        let mut sim = Simulation::new(config, plan, Worker, comm, heat)?;
                        sim.run()?;
                        sim.finish()
                    })
                };
                match spawned {
                    Ok(handle) => handles.push((rank, handle)),
                    Err(e) => {
                        spawn_error = Some((
                            rank,
                            Err(SimError::ThreadSpawnFailed {
                                reason: format!("rank {rank}: {e}"),
                            }),
                        ));
                        break;
                    }
                }
            }
            // Endpoints not yet handed to a thread are dropped here, which
            // disconnects the ranks that did start.
            let mut results: Vec<_> = handles
                .into_iter()
                .map(|(rank, h)| {
                    let result = h
                        .join()
                        .unwrap_or(Err(SimError::WorkerPanicked { rank }));
                    (rank, result)
                })
                .collect();
            if let Some(failed) = spawn_error {
                results.push(failed);
            }
            results
        });

        let mut outcomes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (rank, result) in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => failures.push((rank, e)),
            }
        }
        if !failures.is_empty() {
            return Err(root_cause(failures));
        }

        let mut metrics = WorkerMetrics::default();
        let mut per_worker = Vec::with_capacity(outcomes.len());
        let mut collected = None;
        for outcome in outcomes {
            metrics.merge(&outcome.metrics);
            debug!(
                rank = %outcome.rank,
                halo_messages = outcome.metrics.halo.messages_sent,
                halo_ms = outcome.metrics.halo_time.as_secs_f64() * 1e3,
                stencil_ms = outcome.metrics.stencil_time.as_secs_f64() * 1e3,
                gather_ms = outcome.metrics.gather_time.as_secs_f64() * 1e3,
                "worker metrics"
            );
            per_worker.push(outcome.metrics);
            if outcome.collected.is_some() {
                collected = outcome.collected;
            }
        }
        let collected = collected.ok_or(SimError::InvalidState {
            op: "collect final field",
            state: crate::SimState::Finished,
        })?;

        let elapsed = started.elapsed();
        info!(
            steps = self.config.steps,
            snapshots = collected.snapshots,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            final_heat = collected.temperature.interior_sum(),
            "cluster finished"
        );
        Ok(RunReport {
            final_temperature: collected.temperature,
            steps: self.config.steps,
            snapshots: collected.snapshots,
            metrics,
            per_worker,
            elapsed,
        })
    }
}

/// Pick the error to report: the first that is not just a disconnect,
/// falling back to the first of all.
fn root_cause(failures: Vec<(Rank, SimError)>) -> SimError {
    let pick = failures
        .iter()
        .position(|(_, e)| !e.is_disconnect())
        .unwrap_or(0);
    let mut failures = failures;
    let (rank, error) = failures.swap_remove(pick);
    match error {
        e @ (SimError::WorkerPanicked { .. } | SimError::ThreadSpawnFailed { .. }) => e,
        e => SimError::WorkerFailed {
            rank,
            source: Box::new(e),
        },
    }
}
