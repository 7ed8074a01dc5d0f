use fl_codec::impl_wire_codec_for_newtype;
use fl_common::{Hash32, ANCESTOR_TABLE_CAPACITY};

/// The per-ledger table of recent ancestor hashes, oldest first.
///
/// Holds up to [`ANCESTOR_TABLE_CAPACITY`] entries, exactly one measurement
/// window; closing a ledger appends the parent hash and drops the oldest
/// entry once full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorTable(Vec<Hash32>);
impl_wire_codec_for_newtype!(AncestorTable, Vec<Hash32>);

impl AncestorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new ancestor hash, evicting the oldest entry when the
    /// table is full.
    pub fn push(&mut self, hash: Hash32) {
        self.0.push(hash);
        if self.0.len() > ANCESTOR_TABLE_CAPACITY {
            self.0.remove(0);
        }
    }

    pub fn hashes(&self) -> &[Hash32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `n` most recent ancestor hashes, oldest first, or `None` when
    /// the table cannot cover the requested window.
    pub fn recent_window(&self, n: usize) -> Option<&[Hash32]> {
        if self.0.len() < n {
            return None;
        }
        Some(&self.0[self.0.len() - n..])
    }
}
