//! Initial conditions.
//!
//! A [`Scenario`] fills the coordinator's global fields before scatter
//! and names the heater, if any. Every position is a fixed fraction of
//! the grid, so the same scenario works at any resolution.

use calor_core::Material;
use calor_grid::Field;
use calor_solver::HeatSource;

use crate::config::SimConfig;

/// Populates the global temperature and material fields.
pub trait Scenario: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fill `temperature` (global temperature layout, no margin) and
    /// `material` (global material layout, margin included) with initial
    /// temperatures and stencil coefficients.
    fn populate(&self, config: &SimConfig, temperature: &mut Field, material: &mut Field);

    /// The heater held at a fixed temperature while injection is on.
    fn heat_source(&self, config: &SimConfig) -> Option<HeatSource>;
}

/// The reference plate: mercury background, a copper block upper right, a
/// tin block lower left, and an aluminium heater across the middle.
///
/// ```text
///  ┌────────────────────────┐
///  │               ┌───┐    │  copper: x ∈ [5W/8, 7W/8), y ∈ [H/8, 3H/8)
///  │               └───┘    │
///  │     ┌─────────────┐    │  heater: x ∈ [W/4, 3W/4], y ∈ [H/2 − H/16, H/2 + H/16]
///  │     └─────────────┘    │
///  │  ┌───────┐             │  tin:    x ∈ [W/8, 3W/8), y ∈ [5H/8, 7H/8)
///  │  └───────┘             │
///  └────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PlateScenario;

impl PlateScenario {
    /// Material of global cell `(x, y)`. Cells outside the grid (the
    /// material margin) are background.
    pub fn material_at(config: &SimConfig, x: i64, y: i64) -> Material {
        let (w, h) = (i64::from(config.width), i64::from(config.height));
        if x < 0 || y < 0 || x >= w || y >= h {
            return Material::Mercury;
        }
        if let Some(heater) = PlateScenario.heat_source(config) {
            if heater.contains(x as u32, y as u32) {
                return Material::Aluminium;
            }
        }
        if (5 * w / 8..7 * w / 8).contains(&x) && (h / 8..3 * h / 8).contains(&y) {
            return Material::Copper;
        }
        if (w / 8..w / 2 - w / 8).contains(&x) && (5 * h / 8..7 * h / 8).contains(&y) {
            return Material::Tin;
        }
        Material::Mercury
    }
}

impl Scenario for PlateScenario {
    fn name(&self) -> &str {
        "plate"
    }

    fn populate(&self, config: &SimConfig, temperature: &mut Field, material: &mut Field) {
        let coef = Material::ALL.map(|m| config.coefficient(m));
        let t = &config.temperatures;

        let ml = *material.layout();
        let m = ml.margin() as i32;
        for y in -m..ml.height() as i32 + m {
            for x in -m..ml.width() as i32 + m {
                let mat = Self::material_at(config, x.into(), y.into());
                material.set(x, y, coef[mat as usize]);
            }
        }

        let tl = *temperature.layout();
        for y in 0..tl.height() as i32 {
            for x in 0..tl.width() as i32 {
                let value = match Self::material_at(config, x.into(), y.into()) {
                    Material::Mercury => t.background,
                    Material::Copper | Material::Tin => t.block,
                    Material::Aluminium => t.heater,
                };
                temperature.set(x, y, value);
            }
        }
    }

    fn heat_source(&self, config: &SimConfig) -> Option<HeatSource> {
        Some(HeatSource::for_grid(
            config.width,
            config.height,
            config.temperatures.heater,
        ))
    }
}

/// Uniform temperature and a uniform coefficient, no heater.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformScenario {
    /// Temperature of every cell.
    pub temperature: f32,
    /// Stencil coefficient of every cell, margin included.
    pub coefficient: f32,
}

impl Scenario for UniformScenario {
    fn name(&self) -> &str {
        "uniform"
    }

    fn populate(&self, _config: &SimConfig, temperature: &mut Field, material: &mut Field) {
        temperature.fill(self.temperature);
        material.fill(self.coefficient);
    }

    fn heat_source(&self, _config: &SimConfig) -> Option<HeatSource> {
        None
    }
}
