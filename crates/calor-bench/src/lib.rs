//! Benchmark profiles for the calor heat solver.
//!
//! - [`reference_profile`]: the full 256×256 reference run, shortened
//! - [`local_fields`]: one worker's temperature and material fields

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use calor_core::Material;
use calor_engine::SimConfig;
use calor_grid::{Field, GridError, Layout};

/// Reference 256×256 plate with `steps` steps.
///
/// Heat is injected for the first half; snapshots every 100 steps.
pub fn reference_profile(steps: u64) -> SimConfig {
    SimConfig {
        steps,
        heat_cutoff: steps / 2,
        snapshot_interval: 100,
        ..SimConfig::default()
    }
}

/// A `width`×`height` subdomain as one worker holds it: a temperature field
/// with a one-cell halo at 20° plus a hot cross, and a mercury material
/// window.
pub fn local_fields(width: u32, height: u32) -> Result<(Field, Field), GridError> {
    let config = SimConfig::default();
    let mut temperature = Field::filled(Layout::local_temperature(width, height, 1)?, 20.0)?;
    for x in 0..width as i32 {
        temperature.set(x, height as i32 / 2, 100.0);
    }
    for y in 0..height as i32 {
        temperature.set(width as i32 / 2, y, 100.0);
    }
    let material = Field::filled(
        Layout::local_material(width, height)?,
        config.coefficient(Material::Mercury),
    )?;
    Ok((temperature, material))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_valid() {
        let config = reference_profile(200);
        config.validate().unwrap();
        assert_eq!(config.heat_cutoff, 100);
        assert!(config.plan(4).is_ok());
    }

    #[test]
    fn local_fields_have_matching_shapes() {
        let (t, m) = local_fields(32, 16).unwrap();
        assert_eq!(t.layout().width(), m.layout().width());
        assert_eq!(t.layout().height(), m.layout().height());
        assert_eq!(t.get(16, 3), 100.0);
        assert_eq!(t.get(-1, -1), 20.0);
    }
}
