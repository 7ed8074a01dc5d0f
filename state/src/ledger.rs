use crate::AncestorTable;
use fl_codec::{WireCodecError, WireEncode};
use fl_common::{Hash32, LedgerSeq, HASH32_EMPTY};
use fl_crypto::content_hash;
use fl_types::{LedgerHeader, NegativeUnlState};
use std::sync::Arc;

/// A closed ledger. Immutable; shared by reference through [`Arc`].
#[derive(Debug)]
pub struct Ledger {
    header: LedgerHeader,
    hash: Hash32,
    ancestors: AncestorTable,
    negative_unl: NegativeUnlState,
}

impl Ledger {
    /// The empty ledger every chain starts from.
    pub fn genesis() -> Result<Arc<Self>, WireCodecError> {
        let header = LedgerHeader::new(0, HASH32_EMPTY);
        let ancestors = AncestorTable::new();
        let negative_unl = NegativeUnlState::new();
        let hash = ledger_hash(&header, &ancestors, &negative_unl)?;
        Ok(Arc::new(Self {
            header,
            hash,
            ancestors,
            negative_unl,
        }))
    }

    pub fn seq(&self) -> LedgerSeq {
        self.header.seq
    }

    pub fn hash(&self) -> &Hash32 {
        &self.hash
    }

    pub fn parent_hash(&self) -> &Hash32 {
        &self.header.parent_hash
    }

    pub fn ancestors(&self) -> &AncestorTable {
        &self.ancestors
    }

    pub fn negative_unl(&self) -> &NegativeUnlState {
        &self.negative_unl
    }
}

/// The mutable working copy a ledger is built in.
///
/// Opened on a closed parent, mutated by transaction application and the
/// flag-ledger transition, then sealed atomically by [`OpenView::close`].
#[derive(Debug, Clone)]
pub struct OpenView {
    header: LedgerHeader,
    ancestors: AncestorTable,
    negative_unl: NegativeUnlState,
}

impl OpenView {
    pub fn on_parent(parent: &Ledger) -> Self {
        let mut ancestors = parent.ancestors.clone();
        ancestors.push(parent.hash);
        Self {
            header: LedgerHeader::new(parent.seq() + 1, parent.hash),
            ancestors,
            negative_unl: parent.negative_unl.clone(),
        }
    }

    pub fn seq(&self) -> LedgerSeq {
        self.header.seq
    }

    pub fn parent_hash(&self) -> &Hash32 {
        &self.header.parent_hash
    }

    pub fn negative_unl(&self) -> &NegativeUnlState {
        &self.negative_unl
    }

    pub fn negative_unl_mut(&mut self) -> &mut NegativeUnlState {
        &mut self.negative_unl
    }

    /// Seals the view into an immutable ledger with its content hash.
    pub fn close(self) -> Result<Arc<Ledger>, WireCodecError> {
        let hash = ledger_hash(&self.header, &self.ancestors, &self.negative_unl)?;
        Ok(Arc::new(Ledger {
            header: self.header,
            hash,
            ancestors: self.ancestors,
            negative_unl: self.negative_unl,
        }))
    }
}

fn ledger_hash(
    header: &LedgerHeader,
    ancestors: &AncestorTable,
    negative_unl: &NegativeUnlState,
) -> Result<Hash32, WireCodecError> {
    let mut preimage =
        Vec::with_capacity(header.size_hint() + ancestors.size_hint() + negative_unl.size_hint());
    header.encode_to(&mut preimage)?;
    ancestors.encode_to(&mut preimage)?;
    negative_unl.encode_to(&mut preimage)?;
    Ok(content_hash(&preimage))
}
