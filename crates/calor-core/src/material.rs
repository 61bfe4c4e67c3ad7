//! Materials and the stencil coefficient they contribute.
//!
//! Diffusivities are `k / (rho * cp)` for each metal:
//!
//! | material  | cp    | rho   | k    | alpha  |
//! |-----------|-------|-------|------|--------|
//! | mercury   | 0.140 | 13506 | 8.69 | 0.0619 |
//! | copper    | 0.385 | 8960  | 401  | 0.116  |
//! | tin       | 0.227 | 7300  | 67   | 0.040  |
//! | aluminium | 0.897 | 2700  | 237  | 0.098  |

use std::fmt;

/// Largest stencil coefficient for which the explicit 5-point update is stable.
pub const STABILITY_LIMIT: f32 = 0.25;

/// Stencil coefficient `alpha * dt / h²` for a material of diffusivity `alpha`.
///
/// This is the only place the coefficient is derived; every material
/// value stored in a field comes from here.
pub fn diffusion_coefficient(diffusivity: f32, dt: f32, h: f32) -> f32 {
    diffusivity * dt / (h * h)
}

/// A material occupying part of the plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    /// Background material filling the plate.
    Mercury,
    /// The upper-right block.
    Copper,
    /// The lower-left block.
    Tin,
    /// The heating element.
    Aluminium,
}

impl Material {
    /// Every material, in declaration order.
    pub const ALL: [Material; 4] = [Self::Mercury, Self::Copper, Self::Tin, Self::Aluminium];

    /// Reference thermal diffusivity.
    pub fn diffusivity(self) -> f32 {
        match self {
            Self::Mercury => 0.0619,
            Self::Copper => 0.116,
            Self::Tin => 0.040,
            Self::Aluminium => 0.098,
        }
    }

    /// Stencil coefficient for the reference diffusivity.
    pub fn coefficient(self, dt: f32, h: f32) -> f32 {
        diffusion_coefficient(self.diffusivity(), dt, h)
    }

    /// Lower-case material name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mercury => "mercury",
            Self::Copper => "copper",
            Self::Tin => "tin",
            Self::Aluminium => "aluminium",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
