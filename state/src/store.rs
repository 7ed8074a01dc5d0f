use crate::Ledger;
use fl_common::Hash32;
use std::collections::HashMap;
use std::sync::Arc;

/// Owner of closed ledgers, handing out shared read handles by hash.
#[derive(Debug, Default)]
pub struct LedgerStore {
    ledgers: HashMap<Hash32, Arc<Ledger>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ledger: Arc<Ledger>) {
        self.ledgers.insert(*ledger.hash(), ledger);
    }

    pub fn get(&self, hash: &Hash32) -> Option<Arc<Ledger>> {
        self.ledgers.get(hash).cloned()
    }

    pub fn contains(&self, hash: &Hash32) -> bool {
        self.ledgers.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}
