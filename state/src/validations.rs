use fl_common::{Hash32, LedgerSeq, NodeId};
use std::collections::{HashMap, HashSet};

/// Read access to the validation message container.
///
/// The store guarantees at most one validation per (validator, ledger);
/// lookups are non-blocking.
pub trait ValidationStore {
    /// The trusted validators that validated the ledger with the given
    /// hash.
    fn trusted_validators_for(&self, ledger_hash: &Hash32) -> HashSet<NodeId>;

    /// Hint that the window ending at `seq` is about to be measured, so
    /// entries for older ledgers may be dropped.
    fn keep_up_to(&self, _seq: LedgerSeq) {}
}

/// An in-memory validation container.
#[derive(Debug, Default)]
pub struct MemoryValidationStore {
    by_ledger: HashMap<Hash32, HashSet<NodeId>>,
}

impl MemoryValidationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one validation. A repeated (validator, ledger) pair is
    /// absorbed.
    pub fn record(&mut self, ledger_hash: Hash32, validator: NodeId) {
        self.by_ledger.entry(ledger_hash).or_default().insert(validator);
    }
}

impl ValidationStore for MemoryValidationStore {
    fn trusted_validators_for(&self, ledger_hash: &Hash32) -> HashSet<NodeId> {
        self.by_ledger.get(ledger_hash).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_validations_count_once() {
        let mut store = MemoryValidationStore::new();
        let hash = [1u8; 32];
        let nid = [7u8; 20];

        store.record(hash, nid);
        store.record(hash, nid);

        assert_eq!(store.trusted_validators_for(&hash).len(), 1);
        assert!(store.trusted_validators_for(&[2u8; 32]).is_empty());
    }
}
