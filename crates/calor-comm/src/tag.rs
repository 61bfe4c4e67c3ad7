//! Message tags and envelopes.

use std::fmt;

use calor_core::Direction;

/// What a message carries.
///
/// Every receive names the tag it expects; a mismatch is a protocol
/// error, not something to buffer and reorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// A worker's margined window of the material field.
    ScatterMaterial,
    /// A worker's block of the initial temperature field.
    ScatterTemperature,
    /// A worker's interior, sent back to the coordinator.
    Gather,
    /// A halo strip travelling in the given direction.
    ///
    /// The strip a worker sends to its northern neighbour is tagged
    /// `Halo(North)`; that neighbour receives it from its south.
    Halo(Direction),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScatterMaterial => f.write_str("scatter-material"),
            Self::ScatterTemperature => f.write_str("scatter-temperature"),
            Self::Gather => f.write_str("gather"),
            Self::Halo(d) => write!(f, "halo-{d}"),
        }
    }
}

/// A tagged payload in flight between two ranks.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// What the payload is.
    pub tag: Tag,
    /// Packed cell values.
    pub payload: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_direction() {
        assert_eq!(Tag::Halo(Direction::East).to_string(), "halo-east");
        assert_eq!(Tag::Gather.to_string(), "gather");
    }
}
