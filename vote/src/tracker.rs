use fl_common::{LedgerSeq, NodeId, NEW_VALIDATOR_SKIP};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::trace;

/// Remembers when validators first became trusted, so they are not
/// disabled before they have had one full window to prove themselves.
///
/// Written to by the trusted-list update thread and read by the consensus
/// thread; a single lock serializes both. The memory is process-local and
/// starts empty after a restart.
#[derive(Debug, Default)]
pub struct NewValidatorTracker {
    inner: Mutex<HashMap<NodeId, LedgerSeq>>,
}

impl NewValidatorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the sequence at which the given validators became trusted.
    /// Already-tracked validators keep their first-seen sequence.
    pub fn note_newly_trusted(&self, seq: LedgerSeq, now_trusted: &HashSet<NodeId>) {
        let mut map = self.inner.lock().expect("new-validator map lock poisoned");
        for nid in now_trusted {
            map.entry(*nid).or_insert_with(|| {
                trace!("Tracking new validator {} from seq={seq}", hex::encode(nid));
                seq
            });
        }
    }

    /// Drops every validator whose shielding window has passed.
    pub fn purge(&self, current_seq: LedgerSeq) {
        let mut map = self.inner.lock().expect("new-validator map lock poisoned");
        map.retain(|_, seq| current_seq.saturating_sub(*seq) <= NEW_VALIDATOR_SKIP);
    }

    pub fn contains(&self, nid: &NodeId) -> bool {
        self.inner
            .lock()
            .expect("new-validator map lock poisoned")
            .contains_key(nid)
    }

    /// A snapshot of the tracked validators.
    pub fn tracked(&self) -> HashSet<NodeId> {
        self.inner
            .lock()
            .expect("new-validator map lock poisoned")
            .keys()
            .copied()
            .collect()
    }
}
