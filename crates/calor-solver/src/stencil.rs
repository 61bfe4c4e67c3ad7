//! Forward-time, centred-space update of the local interior.

use calor_grid::{DoubleBuffer, Field};

use crate::error::SolverError;

/// Write one explicit step of the 5-point stencil from `cur` into `next`.
///
/// For each interior cell:
///
/// ```text
/// next = c + m · (e + w + s + n − 4c)
/// ```
///
/// where `m` is the cell's coefficient in `material`. `cur` must have a
/// margin (its halo) and `next` must share its layout; `material` must
/// cover the same interior. Margin cells of `next` are not written.
pub fn ftcs_update(cur: &Field, material: &Field, next: &mut Field) -> Result<(), SolverError> {
    let tl = *cur.layout();
    let ml = *material.layout();
    let shape = (tl.width(), tl.height());
    if tl.margin() == 0 {
        return Err(SolverError::NoMargin { kind: tl.kind() });
    }
    if (ml.width(), ml.height()) != shape {
        return Err(SolverError::ShapeMismatch {
            context: "stencil material",
            expected: shape,
            actual: (ml.width(), ml.height()),
        });
    }
    if next.layout() != &tl {
        let nl = next.layout();
        return Err(SolverError::ShapeMismatch {
            context: "stencil output",
            expected: shape,
            actual: (nl.width(), nl.height()),
        });
    }

    let stride = tl.padded_width();
    let width = tl.width() as usize;
    let c = cur.as_slice();
    let m = material.as_slice();
    let n = next.as_mut_slice();
    for y in 0..tl.height() as i32 {
        let row = tl.index(0, y);
        let mrow = ml.index(0, y);
        for x in 0..width {
            let i = row + x;
            let centre = c[i];
            let lap = c[i + 1] + c[i - 1] + c[i + stride] + c[i - stride] - 4.0 * centre;
            n[i] = centre + m[mrow + x] * lap;
        }
    }
    Ok(())
}

/// Apply [`ftcs_update`] from the buffer's current slot to its next slot.
///
/// The buffer is not swapped.
pub fn update(buffer: &mut DoubleBuffer, material: &Field) -> Result<(), SolverError> {
    let (cur, next) = buffer.split();
    ftcs_update(cur, material, next)
}
