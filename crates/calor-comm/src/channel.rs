//! In-process [`Communicator`] over crossbeam channels.

use crossbeam_channel::{Receiver, Sender};

use calor_core::Rank;

use crate::communicator::Communicator;
use crate::error::CommError;
use crate::tag::{Message, Tag};

/// One rank's endpoint of a fully connected channel mesh.
///
/// The mesh holds `n²` unbounded channels, one per ordered pair
/// (including each rank to itself). Endpoints are `Send` and are meant
/// to be moved onto one worker thread each.
#[derive(Debug)]
pub struct ChannelComm {
    rank: Rank,
    /// `outbox[d]` delivers to rank `d`.
    outbox: Vec<Sender<Message>>,
    /// `inbox[s]` receives from rank `s`.
    inbox: Vec<Receiver<Message>>,
}

impl ChannelComm {
    /// Build a mesh of `size` connected endpoints, returned in rank order.
    pub fn mesh(size: usize) -> Vec<ChannelComm> {
        // channels[src][dst]
        let mut senders: Vec<Vec<Sender<Message>>> = Vec::with_capacity(size);
        let mut receivers: Vec<Vec<Receiver<Message>>> = (0..size).map(|_| Vec::new()).collect();
        for _src in 0..size {
            let mut row = Vec::with_capacity(size);
            for inbox in receivers.iter_mut() {
                let (tx, rx) = crossbeam_channel::unbounded();
                row.push(tx);
                inbox.push(rx);
            }
            senders.push(row);
        }
        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(r, (outbox, inbox))| ChannelComm {
                rank: Rank(r),
                outbox,
                inbox,
            })
            .collect()
    }

    fn check_peer(&self, peer: Rank) -> Result<(), CommError> {
        if peer.index() >= self.outbox.len() {
            return Err(CommError::UnknownPeer {
                peer,
                size: self.outbox.len(),
            });
        }
        Ok(())
    }
}

impl Communicator for ChannelComm {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.outbox.len()
    }

    fn send(&self, dest: Rank, tag: Tag, payload: Vec<f32>) -> Result<(), CommError> {
        self.check_peer(dest)?;
        self.outbox[dest.index()]
            .send(Message { tag, payload })
            .map_err(|_| CommError::Disconnected { peer: dest })
    }

    fn recv(&self, source: Rank, tag: Tag) -> Result<Vec<f32>, CommError> {
        self.check_peer(source)?;
        let msg = self.inbox[source.index()]
            .recv()
            .map_err(|_| CommError::Disconnected { peer: source })?;
        if msg.tag != tag {
            return Err(CommError::UnexpectedTag {
                peer: source,
                expected: tag,
                got: msg.tag,
            });
        }
        Ok(msg.payload)
    }
}
