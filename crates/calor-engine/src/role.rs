//! Coordinator and worker behaviour around the shared step loop.
//!
//! The step loop in [`Simulation`](crate::Simulation) is identical on every
//! rank. The only places ranks differ are initial distribution, gathering,
//! and teardown, and those go through [`Role`].

use calor_comm::{gather_root, gather_send, scatter_recv, scatter_root, Communicator, Tag};
use calor_core::{Rank, Step};
use calor_grid::{Field, GridError, Layout, StridedRegion};
use calor_output::SnapshotSink;
use calor_topology::PartitionPlan;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::scenario::Scenario;

/// Why a gather is happening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collect {
    /// Periodic snapshot: the gathered field goes to the sink.
    Snapshot,
    /// End of run: the gathered field becomes the result.
    Final,
}

/// A rank's share of the initial fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Distributed {
    /// Interior temperatures, row-major.
    pub temperature: Vec<f32>,
    /// Margined material window, row-major.
    pub material: Vec<f32>,
}

/// What the coordinator hands back at teardown.
#[derive(Clone, Debug, PartialEq)]
pub struct Collected {
    /// The final global temperature field.
    pub temperature: Field,
    /// Snapshots written to the sink.
    pub snapshots: u64,
}

/// Rank-specific behaviour.
pub trait Role: Send {
    /// Obtain this rank's share of the initial fields.
    ///
    /// `temperature_len` and `material_len` are the sizes every rank's
    /// shares must have.
    fn distribute<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        temperature_len: usize,
        material_len: usize,
    ) -> Result<Distributed, SimError>;

    /// Contribute this rank's interior at `step` to a gather.
    fn collect<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        step: Step,
        purpose: Collect,
        interior: Vec<f32>,
    ) -> Result<(), SimError>;

    /// Tear down. Only the coordinator returns anything.
    fn finish(self) -> Result<Option<Collected>, SimError>;
}

/// Rank 0: owns the global fields and the snapshot sink.
pub struct Coordinator {
    temperature: Field,
    material: Field,
    blocks: Vec<StridedRegion>,
    windows: Vec<StridedRegion>,
    sink: Box<dyn SnapshotSink>,
    snapshots: u64,
}

impl Coordinator {
    /// Allocate the global fields, populate them from `scenario`, and
    /// precompute every rank's scatter/gather regions.
    pub fn new(
        config: &SimConfig,
        plan: &PartitionPlan,
        scenario: &dyn Scenario,
        sink: Box<dyn SnapshotSink>,
    ) -> Result<Self, SimError> {
        let (w, h) = plan.grid_size();
        let ml = Layout::global_material(w, h)?;
        let mut temperature = Field::zeroed(Layout::global_temperature(w, h)?)?;
        let mut material = Field::zeroed(ml)?;
        scenario.populate(config, &mut temperature, &mut material);

        let ranks = || plan.topology().ranks();
        let blocks = ranks()
            .map(|r| plan.global_block(r))
            .collect::<Result<Vec<_>, _>>()?;
        let windows = ranks()
            .map(|r| plan.material_window(r, &ml))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            scenario = scenario.name(),
            width = w,
            height = h,
            initial_heat = temperature.interior_sum(),
            "global fields populated"
        );
        Ok(Self {
            temperature,
            material,
            blocks,
            windows,
            sink,
            snapshots: 0,
        })
    }

    /// The global temperature as of the last gather.
    pub fn temperature(&self) -> &Field {
        &self.temperature
    }

    /// The global material coefficients.
    pub fn material(&self) -> &Field {
        &self.material
    }

    /// Snapshots written so far.
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }
}

fn check_share(share: &[f32], expected: usize) -> Result<(), SimError> {
    if share.len() != expected {
        return Err(GridError::LengthMismatch {
            expected,
            actual: share.len(),
        }
        .into());
    }
    Ok(())
}

impl Role for Coordinator {
    fn distribute<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        temperature_len: usize,
        material_len: usize,
    ) -> Result<Distributed, SimError> {
        let material = scatter_root(
            comm,
            Tag::ScatterMaterial,
            self.material.as_slice(),
            &self.windows,
        )?;
        check_share(&material, material_len)?;
        let temperature = scatter_root(
            comm,
            Tag::ScatterTemperature,
            self.temperature.as_slice(),
            &self.blocks,
        )?;
        check_share(&temperature, temperature_len)?;
        Ok(Distributed {
            temperature,
            material,
        })
    }

    fn collect<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        step: Step,
        purpose: Collect,
        interior: Vec<f32>,
    ) -> Result<(), SimError> {
        gather_root(
            comm,
            Tag::Gather,
            &interior,
            self.temperature.as_mut_slice(),
            &self.blocks,
        )?;
        if purpose == Collect::Snapshot {
            self.sink.write_snapshot(step, &self.temperature)?;
            self.snapshots += 1;
            info!(%step, heat = self.temperature.interior_sum(), "snapshot");
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Option<Collected>, SimError> {
        self.sink.finish()?;
        Ok(Some(Collected {
            temperature: self.temperature,
            snapshots: self.snapshots,
        }))
    }
}

/// Every rank other than the coordinator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Worker;

impl Role for Worker {
    fn distribute<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        temperature_len: usize,
        material_len: usize,
    ) -> Result<Distributed, SimError> {
        let material = scatter_recv(comm, Rank::COORDINATOR, Tag::ScatterMaterial, material_len)?;
        let temperature = scatter_recv(
            comm,
            Rank::COORDINATOR,
            Tag::ScatterTemperature,
            temperature_len,
        )?;
        Ok(Distributed {
            temperature,
            material,
        })
    }

    fn collect<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        _step: Step,
        _purpose: Collect,
        interior: Vec<f32>,
    ) -> Result<(), SimError> {
        gather_send(comm, Rank::COORDINATOR, Tag::Gather, interior)?;
        Ok(())
    }

    fn finish(self) -> Result<Option<Collected>, SimError> {
        Ok(None)
    }
}
