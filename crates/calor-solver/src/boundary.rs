//! Halo values on faces that touch the edge of the world.

use std::fmt;

use calor_grid::Field;

use crate::error::SolverError;
use crate::halo::HaloPlan;

/// What the margin outside the global grid holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBoundary {
    /// Each step the edge margin copies the adjacent interior strip, so no
    /// heat crosses the world edge.
    #[default]
    Insulated,
    /// The edge margin keeps whatever value it was initialised with and
    /// acts as a fixed-temperature surround.
    Fixed,
}

impl EdgeBoundary {
    /// Fill every face of `field` that has no neighbour in `plan`.
    ///
    /// Returns the number of faces written. Faces with a neighbour belong
    /// to the halo exchange and are never touched.
    pub fn apply(self, plan: &HaloPlan, field: &mut Field) -> Result<usize, SolverError> {
        match self {
            Self::Fixed => Ok(0),
            Self::Insulated => {
                let mut faces = 0;
                for dir in calor_core::Direction::ALL {
                    if plan.neighbours().get(dir).is_some() {
                        continue;
                    }
                    let strip = field.pack(&plan.send_region(dir))?;
                    field.unpack(&plan.recv_region(dir), &strip)?;
                    faces += 1;
                }
                Ok(faces)
            }
        }
    }
}

impl fmt::Display for EdgeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insulated => f.write_str("insulated"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calor_core::{Direction, Rank};
    use calor_grid::Layout;
    use calor_topology::Neighbours;

    fn ramp() -> (HaloPlan, Field) {
        let mut n = Neighbours::default();
        n.set(Direction::East, Some(Rank(1)));
        let l = Layout::local_temperature(3, 2, 1).unwrap();
        let plan = HaloPlan::new(l, n).unwrap();
        let mut f = Field::filled(l, -1.0).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                f.set(x, y, (y * 3 + x) as f32);
            }
        }
        (plan, f)
    }

    #[test]
    fn insulated_mirrors_edge_faces_only() {
        let (plan, mut f) = ramp();
        assert_eq!(EdgeBoundary::Insulated.apply(&plan, &mut f).unwrap(), 3);
        assert_eq!(f.get(0, -1), 0.0);
        assert_eq!(f.get(2, -1), 2.0);
        assert_eq!(f.get(1, 2), 4.0);
        assert_eq!(f.get(-1, 1), 3.0);
        // East has a neighbour.
        assert_eq!(f.get(3, 0), -1.0);
        // Corners are outside every strip.
        assert_eq!(f.get(-1, -1), -1.0);
    }

    #[test]
    fn fixed_leaves_margin_alone() {
        let (plan, mut f) = ramp();
        let before = f.clone();
        assert_eq!(EdgeBoundary::Fixed.apply(&plan, &mut f).unwrap(), 0);
        assert_eq!(f, before);
    }
}
