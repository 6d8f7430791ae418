//! Bookkeeping of checkpoints awaiting liveness resolution.

use parking_lot::Mutex;
use sentinel_primitives::checkpoint::CheckpointRecord;

/// Append-only checklist of checkpoints that passed verification, or
/// triggered fork detection, and have not been resolved yet.
///
/// The monitor's event loop is the only writer; the liveness checker
/// reads snapshots through [`records`](Self::records).
#[derive(Debug, Default)]
pub struct CheckpointsBookkeeper {
    records: Mutex<Vec<CheckpointRecord>>,
}

impl CheckpointsBookkeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. No deduplication is applied; a consumer that
    /// needs per-epoch uniqueness de-duplicates on read.
    pub fn add(&self, record: CheckpointRecord) {
        self.records.lock().push(record);
    }

    /// Snapshot of the pending records, in append order.
    pub fn records(&self) -> Vec<CheckpointRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
