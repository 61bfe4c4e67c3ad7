//! Run configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use calor_core::{diffusion_coefficient, Material, STABILITY_LIMIT};
use calor_solver::EdgeBoundary;
use calor_topology::{CartesianTopology, PartitionPlan, TopologyError};

// ── MaterialTable ──────────────────────────────────────────────────

/// Thermal diffusivity of each material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialTable {
    /// Background plate. Default: 0.0619.
    pub mercury: f32,
    /// Upper-right block. Default: 0.116.
    pub copper: f32,
    /// Lower-left block. Default: 0.040.
    pub tin: f32,
    /// Heating element. Default: 0.098.
    pub aluminium: f32,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            mercury: Material::Mercury.diffusivity(),
            copper: Material::Copper.diffusivity(),
            tin: Material::Tin.diffusivity(),
            aluminium: Material::Aluminium.diffusivity(),
        }
    }
}

impl MaterialTable {
    /// Configured diffusivity of `material`.
    pub fn diffusivity(&self, material: Material) -> f32 {
        match material {
            Material::Mercury => self.mercury,
            Material::Copper => self.copper,
            Material::Tin => self.tin,
            Material::Aluminium => self.aluminium,
        }
    }

    /// Stencil coefficient of `material` for the given discretisation.
    pub fn coefficient(&self, material: Material, dt: f32, h: f32) -> f32 {
        diffusion_coefficient(self.diffusivity(material), dt, h)
    }
}

// ── Temperatures ───────────────────────────────────────────────────

/// Initial and boundary temperatures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Temperatures {
    /// Plate background. Default: 20.
    pub background: f32,
    /// Copper and tin blocks at startup. Default: 60.
    pub block: f32,
    /// Heater, at startup and while injecting. Default: 100.
    pub heater: f32,
    /// Initial value of every local halo cell. Default: 10.
    pub halo: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            background: 20.0,
            block: 60.0,
            heater: 100.0,
            halo: 10.0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SimConfig::validate`] or while planning a run.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The worker topology or partition could not be built.
    Topology(TopologyError),
    /// The grid has a zero dimension.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Only a one-cell halo is supported.
    InvalidBorder {
        /// Configured border width.
        border: u32,
    },
    /// `snapshot_interval` is zero.
    SnapshotIntervalZero,
    /// `dt` or `h` is NaN, infinite, zero, or negative.
    InvalidDiscretization {
        /// `"dt"` or `"h"`.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// A diffusivity is NaN, infinite, or negative.
    InvalidDiffusivity {
        /// The material.
        material: Material,
        /// The invalid value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology(e) => write!(f, "topology: {e}"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid {width}x{height} has no cells")
            }
            Self::InvalidBorder { border } => {
                write!(f, "border width must be 1, got {border}")
            }
            Self::SnapshotIntervalZero => write!(f, "snapshot_interval must be at least 1"),
            Self::InvalidDiscretization { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidDiffusivity { material, value } => {
                write!(f, "{material} diffusivity must be finite and non-negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Topology(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TopologyError> for ConfigError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Everything a run needs apart from the worker count, the scenario, and
/// the output sink.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Grid cells across. Default: 256.
    pub width: u32,
    /// Grid cells down. Default: 256.
    pub height: u32,
    /// Stencil updates to perform. Default: 10 000.
    pub steps: u64,
    /// Heat is injected on steps strictly below this. Default: 5 000.
    pub heat_cutoff: u64,
    /// Gather a snapshot every this many steps. Default: 500.
    pub snapshot_interval: u64,
    /// Halo depth. Must be 1.
    pub border: u32,
    /// Cell size. Default: 0.05.
    pub h: f32,
    /// Time step. Default: 0.0025.
    pub dt: f32,
    /// Diffusivity per material.
    pub materials: MaterialTable,
    /// Initial temperatures.
    pub temperatures: Temperatures,
    /// What lies beyond the world edge. Default: insulated.
    pub boundary: EdgeBoundary,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            steps: 10_000,
            heat_cutoff: 5_000,
            snapshot_interval: 500,
            border: 1,
            h: 5e-2,
            dt: 2.5e-3,
            materials: MaterialTable::default(),
            temperatures: Temperatures::default(),
            boundary: EdgeBoundary::default(),
        }
    }
}

impl SimConfig {
    /// Validate everything that does not depend on the worker count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.border != 1 {
            return Err(ConfigError::InvalidBorder {
                border: self.border,
            });
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::SnapshotIntervalZero);
        }
        for (name, value) in [("dt", self.dt), ("h", self.h)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDiscretization { name, value });
            }
        }
        for material in Material::ALL {
            let value = self.materials.diffusivity(material);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDiffusivity { material, value });
            }
        }
        Ok(())
    }

    /// Validate, then plan the decomposition over `workers` workers.
    pub fn plan(&self, workers: usize) -> Result<PartitionPlan, ConfigError> {
        self.validate()?;
        let topology = CartesianTopology::for_workers(workers)?;
        Ok(PartitionPlan::new(self.width, self.height, topology)?)
    }

    /// Stencil coefficient of `material` under this configuration.
    pub fn coefficient(&self, material: Material) -> f32 {
        self.materials.coefficient(material, self.dt, self.h)
    }

    /// Materials whose coefficient exceeds [`STABILITY_LIMIT`], with the
    /// offending coefficient.
    pub fn unstable_materials(&self) -> Vec<(Material, f32)> {
        Material::ALL
            .into_iter()
            .map(|m| (m, self.coefficient(m)))
            .filter(|&(_, c)| c > STABILITY_LIMIT)
            .collect()
    }
}
