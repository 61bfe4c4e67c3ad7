//! Two-slot temperature storage with explicit current/next roles.
//!
//! Within a step the stencil reads the *current* slot and writes the
//! *next* slot; [`DoubleBuffer::swap`] then promotes next to current
//! without copying. Read and write access come from a single
//! [`split`](DoubleBuffer::split) borrow, so the two can never alias.

use crate::field::Field;
use crate::layout::Layout;

/// Double-buffered field.
///
/// ```text
/// slots[0]  ←── current (even swap count) / next (odd)
/// slots[1]  ←── next (even swap count) / current (odd)
/// ```
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    slots: [Field; 2],
    /// Which slot is current (false = slot 0).
    second_is_current: bool,
    swaps: u64,
}

impl DoubleBuffer {
    /// Create a buffer whose two slots both start as copies of `field`.
    pub fn new(field: Field) -> Self {
        Self {
            slots: [field.clone(), field],
            second_is_current: false,
            swaps: 0,
        }
    }

    /// Layout shared by both slots.
    pub fn layout(&self) -> &Layout {
        self.slots[0].layout()
    }

    /// The slot holding the state of the current step.
    pub fn current(&self) -> &Field {
        &self.slots[usize::from(self.second_is_current)]
    }

    /// Mutable access to the current slot, for halo refresh and heat
    /// injection before the stencil runs.
    pub fn current_mut(&mut self) -> &mut Field {
        &mut self.slots[usize::from(self.second_is_current)]
    }

    /// Mutable access to the next slot.
    pub fn next_mut(&mut self) -> &mut Field {
        &mut self.slots[usize::from(!self.second_is_current)]
    }

    /// Borrow the current slot for reading and the next slot for writing.
    pub fn split(&mut self) -> (&Field, &mut Field) {
        let [a, b] = &mut self.slots;
        if self.second_is_current {
            (b, a)
        } else {
            (a, b)
        }
    }

    /// Promote the next slot to current.
    pub fn swap(&mut self) {
        self.second_is_current = !self.second_is_current;
        self.swaps += 1;
    }

    /// Number of swaps performed since construction.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> DoubleBuffer {
        let l = Layout::local_temperature(2, 2, 1).unwrap();
        DoubleBuffer::new(Field::filled(l, 10.0).unwrap())
    }

    #[test]
    fn split_reads_current_writes_next() {
        let mut b = buffer();
        b.current_mut().set(0, 0, 1.0);
        {
            let (cur, next) = b.split();
            assert_eq!(cur.get(0, 0), 1.0);
            next.set(0, 0, cur.get(0, 0) + 1.0);
        }
        assert_eq!(b.current().get(0, 0), 1.0);
        b.swap();
        assert_eq!(b.current().get(0, 0), 2.0);
        assert_eq!(b.swaps(), 1);
    }

    #[test]
    fn swap_twice_restores_roles() {
        let mut b = buffer();
        b.next_mut().set(1, 1, 5.0);
        b.swap();
        b.swap();
        assert_eq!(b.current().get(1, 1), 10.0);
        assert_eq!(b.next_mut().get(1, 1), 5.0);
    }

    #[test]
    fn both_slots_start_identical() {
        let mut b = buffer();
        let cur = b.current().clone();
        assert_eq!(&cur, b.next_mut());
    }
}
