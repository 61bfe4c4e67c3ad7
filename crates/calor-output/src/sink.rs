//! The snapshot output seam.

use std::sync::{Arc, Mutex, MutexGuard};

use calor_core::Step;
use calor_grid::Field;

use crate::error::OutputError;

/// Receives gathered global temperature fields on the coordinator.
pub trait SnapshotSink: Send {
    /// Consume the field as it stood at `step`.
    fn write_snapshot(&mut self, step: Step, field: &Field) -> Result<(), OutputError>;

    /// Flush anything buffered. Called once after the last snapshot.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn write_snapshot(&mut self, _step: Step, _field: &Field) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Keeps a copy of every snapshot.
///
/// Clones share storage, so a test can hand one clone to the cluster and
/// read the snapshots back through another.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    snapshots: Arc<Mutex<Vec<(Step, Field)>>>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Step, Field)>> {
        self.snapshots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copies of every snapshot received so far, in arrival order.
    pub fn snapshots(&self) -> Vec<(Step, Field)> {
        self.lock().clone()
    }

    /// Steps of every snapshot received so far.
    pub fn steps(&self) -> Vec<Step> {
        self.lock().iter().map(|(s, _)| *s).collect()
    }

    /// Number of snapshots received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl SnapshotSink for MemorySink {
    fn write_snapshot(&mut self, step: Step, field: &Field) -> Result<(), OutputError> {
        self.lock().push((step, field.clone()));
        Ok(())
    }
}
