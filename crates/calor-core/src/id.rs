//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one worker within a cluster.
///
/// Ranks are dense: a cluster of `n` workers uses `Rank(0)..Rank(n)`.
/// [`Rank::COORDINATOR`] owns the global fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub usize);

impl Rank {
    /// The rank that owns the global fields and performs output.
    pub const COORDINATOR: Rank = Rank(0);

    /// Returns `true` for [`Rank::COORDINATOR`].
    pub fn is_coordinator(self) -> bool {
        self == Self::COORDINATOR
    }

    /// The rank as a plain index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Rank {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation step counter.
///
/// Step `t` names the state *before* the `t`-th stencil update, so the
/// initial field is step 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Step(pub u64);

impl Step {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns `true` if this step falls on a multiple of `interval`.
    ///
    /// An interval of zero never matches.
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval != 0 && self.0 % interval == 0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Step {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinator_is_rank_zero() {
        assert!(Rank(0).is_coordinator());
        assert!(!Rank(3).is_coordinator());
        assert_eq!(Rank::from(3).index(), 3);
    }

    #[test]
    fn step_multiples() {
        assert!(Step(0).is_multiple_of(500));
        assert!(Step(1000).is_multiple_of(500));
        assert!(!Step(499).is_multiple_of(500));
        assert!(!Step(10).is_multiple_of(0));
    }

    #[test]
    fn step_next_increments() {
        assert_eq!(Step(41).next(), Step(42));
        assert_eq!(Step::default(), Step(0));
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(Rank(7).to_string(), "7");
        assert_eq!(Step(12).to_string(), "12");
    }
}
