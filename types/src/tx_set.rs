use crate::UnlModify;
use fl_codec::WireCodecError;
use fl_common::Hash32;
use std::collections::BTreeMap;

/// The proposal set a node submits into consensus, keyed by transaction id.
#[derive(Debug, Clone, Default)]
pub struct TxSet {
    txs: BTreeMap<Hash32, UnlModify>,
}

impl TxSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a transaction under its id. Returns `false` when a
    /// transaction with the same id is already present.
    pub fn insert(&mut self, tx: UnlModify) -> Result<bool, WireCodecError> {
        let id = tx.id()?;
        if self.txs.contains_key(&id) {
            return Ok(false);
        }
        self.txs.insert(id, tx);
        Ok(true)
    }

    pub fn contains(&self, id: &Hash32) -> bool {
        self.txs.contains_key(id)
    }

    pub fn get(&self, id: &Hash32) -> Option<&UnlModify> {
        self.txs.get(id)
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// Transactions in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Hash32, &UnlModify)> {
        self.txs.iter()
    }
}
