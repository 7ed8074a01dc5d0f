use fl_codec::{WireCodecError, WireDecode, WireEncode, WireInput, WireOutput};
use fl_common::{Hash32, LedgerSeq};

/// The header fields a ledger contributes to its own content hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerHeader {
    pub seq: LedgerSeq,
    pub parent_hash: Hash32,
}

impl LedgerHeader {
    pub fn new(seq: LedgerSeq, parent_hash: Hash32) -> Self {
        Self { seq, parent_hash }
    }
}

impl WireEncode for LedgerHeader {
    fn size_hint(&self) -> usize {
        self.seq.size_hint() + self.parent_hash.size_hint()
    }

    fn encode_to<O: WireOutput>(&self, dest: &mut O) -> Result<(), WireCodecError> {
        self.seq.encode_to(dest)?;
        self.parent_hash.encode_to(dest)?;
        Ok(())
    }
}

impl WireDecode for LedgerHeader {
    fn decode<I: WireInput>(input: &mut I) -> Result<Self, WireCodecError> {
        Ok(Self {
            seq: LedgerSeq::decode(input)?,
            parent_hash: Hash32::decode(input)?,
        })
    }
}
