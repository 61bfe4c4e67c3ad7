//! The per-rank simulation state machine.
//!
//! ```text
//!  Uninitialized ──initialize──▶ Ready ──step──▶ Running ──step (last)──▶ Finished
//!                                  │                                        ▲
//!                                  └──────────finish (zero steps)───────────┘
//! ```
//!
//! One step at step index `t`:
//!
//! 1. inject heat into the current buffer while `t < heat_cutoff`,
//! 2. exchange halos, then fill world-edge margins,
//! 3. write the next buffer with the stencil,
//! 4. gather the current (step `t`) field if `t` is a snapshot step,
//! 5. swap buffers.
//!
//! After the last step the field is gathered once more so the coordinator
//! ends with the final state.

use std::fmt;
use std::time::Instant;

use calor_comm::Communicator;
use calor_core::{Rank, Step};
use calor_grid::{DoubleBuffer, Field};
use calor_solver::{update, EdgeBoundary, HaloPlan, HeatSource};
use calor_topology::{PartitionPlan, Subdomain, TopologyDescriptor};
use tracing::{debug, trace, Level};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::metrics::WorkerMetrics;
use crate::role::{Collect, Collected, Role};

/// Lifecycle of one rank's simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimState {
    /// Constructed; no local fields yet.
    Uninitialized,
    /// Local fields scattered; no step taken.
    Ready,
    /// At least one step taken, more to go.
    Running,
    /// All steps taken and the final field gathered.
    Finished,
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// A rank's local fields and the halo plan that serves them.
#[derive(Clone, Debug)]
pub struct LocalDomain {
    /// Double-buffered local temperature, halo included.
    pub temperature: DoubleBuffer,
    /// Local material coefficients, margin included.
    pub material: Field,
    /// Strip regions and neighbours for halo exchange.
    pub halo: HaloPlan,
    /// The global rectangle this rank owns.
    pub subdomain: Subdomain,
}

/// What a rank returns after [`Simulation::finish`].
#[derive(Clone, Debug)]
pub struct RankOutcome {
    /// The rank.
    pub rank: Rank,
    /// Counters accumulated over the run.
    pub metrics: WorkerMetrics,
    /// Final global field and snapshot count, coordinator only.
    pub collected: Option<Collected>,
}

/// One rank's view of a run: its role, its endpoint, and its local fields.
pub struct Simulation<R: Role, C: Communicator> {
    state: SimState,
    role: R,
    comm: C,
    descriptor: TopologyDescriptor,
    steps: u64,
    heat_cutoff: u64,
    snapshot_interval: u64,
    border: u32,
    halo_temperature: f32,
    boundary: EdgeBoundary,
    heat: Option<HeatSource>,
    domain: Option<LocalDomain>,
    step: Step,
    metrics: WorkerMetrics,
}

impl<R: Role, C: Communicator> Simulation<R, C> {
    /// Prepare `comm.rank()`'s simulation. Nothing is allocated or
    /// exchanged until [`initialize`](Self::initialize).
    pub fn new(
        config: &SimConfig,
        plan: &PartitionPlan,
        role: R,
        comm: C,
        heat: Option<HeatSource>,
    ) -> Result<Self, SimError> {
        let descriptor = plan.descriptor(comm.rank())?;
        Ok(Self {
            state: SimState::Uninitialized,
            role,
            comm,
            descriptor,
            steps: config.steps,
            heat_cutoff: config.heat_cutoff,
            snapshot_interval: config.snapshot_interval,
            border: config.border,
            halo_temperature: config.temperatures.halo,
            boundary: config.boundary,
            heat,
            domain: None,
            step: Step::default(),
            metrics: WorkerMetrics::default(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Index of the next step to run; equals the step count once finished.
    pub fn current_step(&self) -> Step {
        self.step
    }

    /// This rank's place in the decomposition.
    pub fn descriptor(&self) -> &TopologyDescriptor {
        &self.descriptor
    }

    /// Local fields, once initialized.
    pub fn domain(&self) -> Option<&LocalDomain> {
        self.domain.as_ref()
    }

    /// Counters so far.
    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }

    /// Allocate local fields and receive this rank's share of the initial
    /// state. `Uninitialized → Ready`.
    pub fn initialize(&mut self) -> Result<(), SimError> {
        if self.state != SimState::Uninitialized {
            return Err(SimError::InvalidState {
                op: "initialize",
                state: self.state,
            });
        }
        let sub = self.descriptor.subdomain;
        let tl = calor_grid::Layout::local_temperature(sub.width, sub.height, self.border)?;
        let ml = calor_grid::Layout::local_material(sub.width, sub.height)?;
        let mut temperature = Field::filled(tl, self.halo_temperature)?;
        let mut material = Field::zeroed(ml)?;

        let share = self
            .role
            .distribute(&self.comm, tl.interior_len(), ml.len())?;
        temperature.unpack(&tl.interior(), &share.temperature)?;
        material.unpack(&ml.padded(), &share.material)?;

        let halo = HaloPlan::new(tl, self.descriptor.neighbours)?;
        debug!(
            rank = %self.descriptor.rank,
            x = sub.x,
            y = sub.y,
            width = sub.width,
            height = sub.height,
            neighbours = self.descriptor.neighbours.count(),
            "worker initialized"
        );
        if tracing::enabled!(Level::TRACE) {
            trace!(rank = %self.descriptor.rank, "initial local temperature\n{}", temperature.render(true));
        }
        self.domain = Some(LocalDomain {
            temperature: DoubleBuffer::new(temperature),
            material,
            halo,
            subdomain: sub,
        });
        self.state = SimState::Ready;
        Ok(())
    }

    fn gather(&mut self, purpose: Collect) -> Result<(), SimError> {
        let Some(domain) = self.domain.as_ref() else {
            return Err(SimError::InvalidState {
                op: "gather",
                state: self.state,
            });
        };
        let start = Instant::now();
        let interior = domain.temperature.current().interior();
        self.role
            .collect(&self.comm, self.step, purpose, interior)?;
        self.metrics.gather_time += start.elapsed();
        self.metrics.gathers += 1;
        Ok(())
    }

    fn complete(&mut self) -> Result<(), SimError> {
        self.gather(Collect::Final)?;
        self.state = SimState::Finished;
        Ok(())
    }

    /// Run one step. `Ready → Running`, and `Running → Finished` after
    /// the last one.
    pub fn step(&mut self) -> Result<SimState, SimError> {
        if !matches!(self.state, SimState::Ready | SimState::Running) || self.step.0 >= self.steps {
            return Err(SimError::InvalidState {
                op: "step",
                state: self.state,
            });
        }
        let t = self.step;
        let Some(domain) = self.domain.as_mut() else {
            return Err(SimError::InvalidState {
                op: "step",
                state: self.state,
            });
        };

        if t.0 < self.heat_cutoff {
            if let Some(heat) = &self.heat {
                let n = heat.inject(&domain.subdomain, domain.temperature.current_mut());
                self.metrics.injected_cells += n as u64;
            }
        }

        let start = Instant::now();
        let stats = domain
            .halo
            .exchange(&self.comm, domain.temperature.current_mut())?;
        self.boundary
            .apply(&domain.halo, domain.temperature.current_mut())?;
        self.metrics.halo.merge(stats);
        self.metrics.halo_time += start.elapsed();

        let start = Instant::now();
        update(&mut domain.temperature, &domain.material)?;
        self.metrics.stencil_time += start.elapsed();

        if t.is_multiple_of(self.snapshot_interval) {
            self.gather(Collect::Snapshot)?;
        }

        if let Some(domain) = self.domain.as_mut() {
            domain.temperature.swap();
        }
        self.step = t.next();
        self.metrics.steps += 1;
        self.state = SimState::Running;

        if self.step.0 == self.steps {
            self.complete()?;
        }
        Ok(self.state)
    }

    /// Initialize if needed and step until finished.
    pub fn run(&mut self) -> Result<(), SimError> {
        if self.state == SimState::Uninitialized {
            self.initialize()?;
        }
        while self.state != SimState::Finished {
            if self.step.0 >= self.steps {
                self.complete()?;
            } else {
                self.step()?;
            }
        }
        Ok(())
    }

    /// Tear down, returning metrics and, on the coordinator, the final
    /// global field.
    ///
    /// A run with zero steps may finish straight from `Ready`; otherwise
    /// every step must have been taken.
    pub fn finish(mut self) -> Result<RankOutcome, SimError> {
        let state = self.state;
        match state {
            SimState::Finished => {}
            SimState::Ready if self.steps == 0 => self.complete()?,
            state => return Err(SimError::InvalidState { op: "finish", state }),
        }
        let rank = self.descriptor.rank;
        let metrics = self.metrics;
        let collected = self.role.finish()?;
        Ok(RankOutcome {
            rank,
            metrics,
            collected,
        })
    }
}
