//! The messaging seam between the solver and its transport.

use calor_core::Rank;

use crate::error::CommError;
use crate::tag::Tag;

/// Tagged point-to-point messaging among a fixed set of ranks.
///
/// Implementations must deliver messages between any ordered pair of
/// ranks in send order. `send` may return before the message is
/// received; `recv` blocks until a message from `source` is available.
pub trait Communicator: Send {
    /// This endpoint's rank.
    fn rank(&self) -> Rank;

    /// Number of ranks.
    fn size(&self) -> usize;

    /// Send `payload` to `dest` under `tag`.
    fn send(&self, dest: Rank, tag: Tag, payload: Vec<f32>) -> Result<(), CommError>;

    /// Receive the next message from `source`, which must carry `tag`.
    fn recv(&self, source: Rank, tag: Tag) -> Result<Vec<f32>, CommError>;

    /// [`recv`](Self::recv), additionally requiring exactly `len` cells.
    fn recv_exact(&self, source: Rank, tag: Tag, len: usize) -> Result<Vec<f32>, CommError> {
        let payload = self.recv(source, tag)?;
        if payload.len() != len {
            return Err(CommError::LengthMismatch {
                peer: source,
                tag,
                expected: len,
                got: payload.len(),
            });
        }
        Ok(payload)
    }
}
