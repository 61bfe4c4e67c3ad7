//! The heater: a fixed rectangle pinned to a set temperature.

use calor_grid::Field;
use calor_topology::Subdomain;

/// An inclusive rectangle of global cells held at `temperature` while
/// heating is on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatSource {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    temperature: f32,
}

impl HeatSource {
    /// A source covering `x0..=x1` × `y0..=y1`.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32, temperature: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
            temperature,
        }
    }

    /// The standard heater for a `width × height` grid: the middle half of
    /// the grid across, an eighth of it tall around the centre row.
    pub fn for_grid(width: u32, height: u32, temperature: f32) -> Self {
        let (w, h) = (width.max(1), height.max(1));
        let x0 = w / 4;
        let x1 = (3 * w / 4).min(w - 1);
        let y0 = (h / 2).saturating_sub(h / 16);
        let y1 = (h / 2 + h / 16).min(h - 1);
        Self::new(x0, y0, x1, y1, temperature)
    }

    /// Injection temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Inclusive bounds `(x0, y0, x1, y1)`.
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// `true` if global cell `(gx, gy)` is a heater cell.
    pub fn contains(&self, gx: u32, gy: u32) -> bool {
        (self.x0..=self.x1).contains(&gx) && (self.y0..=self.y1).contains(&gy)
    }

    /// Number of heater cells.
    pub fn cells(&self) -> usize {
        (self.x1 - self.x0 + 1) as usize * (self.y1 - self.y0 + 1) as usize
    }

    /// Overwrite the heater cells that fall inside `sub` in the local
    /// `field`. Returns how many were written.
    pub fn inject(&self, sub: &Subdomain, field: &mut Field) -> usize {
        if sub.width == 0 || sub.height == 0 {
            return 0;
        }
        let gx0 = self.x0.max(sub.x);
        let gy0 = self.y0.max(sub.y);
        let gx1 = self.x1.min(sub.x + sub.width - 1);
        let gy1 = self.y1.min(sub.y + sub.height - 1);
        if gx0 > gx1 || gy0 > gy1 {
            return 0;
        }
        for gy in gy0..=gy1 {
            for gx in gx0..=gx1 {
                field.set((gx - sub.x) as i32, (gy - sub.y) as i32, self.temperature);
            }
        }
        (gx1 - gx0 + 1) as usize * (gy1 - gy0 + 1) as usize
    }
}
