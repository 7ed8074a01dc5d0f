use fl_codec::{WireCodecError, WireDecode, WireEncode, WireInput, WireOutput};
use fl_common::{AccountId, Hash32, LedgerSeq, Octets, ValidatorKey, ACCOUNT_ID_EMPTY};
use fl_crypto::content_hash;

/// Type tag of a Negative UNL modification transaction.
pub const UNL_MODIFY_TX_TAG: u8 = 102;

/// The operation a modification transaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlModifyOp {
    ReEnable = 0,
    Disable = 1,
}

impl WireEncode for UnlModifyOp {
    fn size_hint(&self) -> usize {
        1
    }

    fn encode_to<O: WireOutput>(&self, dest: &mut O) -> Result<(), WireCodecError> {
        dest.push_byte(*self as u8);
        Ok(())
    }
}

impl WireDecode for UnlModifyOp {
    fn decode<I: WireInput>(input: &mut I) -> Result<Self, WireCodecError> {
        match input.read_byte()? {
            0 => Ok(Self::ReEnable),
            1 => Ok(Self::Disable),
            op => Err(WireCodecError::InputError(format!(
                "Invalid modification op {op}"
            ))),
        }
    }
}

/// The common transaction fields a modification carries.
///
/// A modification is protocol-injected: it has no payer, so every field
/// here stays at its zero value. The applier's preflight rejects anything
/// else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEnvelope {
    pub account: AccountId,
    pub fee: u64,
    pub signing_key: Octets,
    pub signature: Octets,
    pub sequence: u32,
    pub prior_txn: Option<Hash32>,
}

impl Default for TxEnvelope {
    fn default() -> Self {
        Self {
            account: ACCOUNT_ID_EMPTY,
            fee: 0,
            signing_key: Octets::new(),
            signature: Octets::new(),
            sequence: 0,
            prior_txn: None,
        }
    }
}

impl WireEncode for TxEnvelope {
    fn size_hint(&self) -> usize {
        self.account.size_hint()
            + self.fee.size_hint()
            + self.signing_key.size_hint()
            + self.signature.size_hint()
            + self.sequence.size_hint()
            + self.prior_txn.size_hint()
    }

    fn encode_to<O: WireOutput>(&self, dest: &mut O) -> Result<(), WireCodecError> {
        self.account.encode_to(dest)?;
        self.fee.encode_to(dest)?;
        self.signing_key.encode_to(dest)?;
        self.signature.encode_to(dest)?;
        self.sequence.encode_to(dest)?;
        self.prior_txn.encode_to(dest)?;
        Ok(())
    }
}

impl WireDecode for TxEnvelope {
    fn decode<I: WireInput>(input: &mut I) -> Result<Self, WireCodecError> {
        Ok(Self {
            account: AccountId::decode(input)?,
            fee: u64::decode(input)?,
            signing_key: Octets::decode(input)?,
            signature: Octets::decode(input)?,
            sequence: u32::decode(input)?,
            prior_txn: Option::decode(input)?,
        })
    }
}

/// A Negative UNL modification transaction.
///
/// `seq` must equal the sequence of the flag ledger the transaction is
/// included in; `validator` is the master public key the operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlModify {
    pub op: UnlModifyOp,
    pub seq: LedgerSeq,
    pub validator: ValidatorKey,
    pub envelope: TxEnvelope,
}

impl UnlModify {
    pub fn disable(seq: LedgerSeq, validator: ValidatorKey) -> Self {
        Self {
            op: UnlModifyOp::Disable,
            seq,
            validator,
            envelope: TxEnvelope::default(),
        }
    }

    pub fn re_enable(seq: LedgerSeq, validator: ValidatorKey) -> Self {
        Self {
            op: UnlModifyOp::ReEnable,
            seq,
            validator,
            envelope: TxEnvelope::default(),
        }
    }

    /// The transaction identity: the content hash of the canonical
    /// encoding.
    pub fn id(&self) -> Result<Hash32, WireCodecError> {
        Ok(content_hash(&self.encode()?))
    }
}

impl WireEncode for UnlModify {
    fn size_hint(&self) -> usize {
        1 + self.op.size_hint()
            + self.seq.size_hint()
            + self.validator.size_hint()
            + self.envelope.size_hint()
    }

    fn encode_to<O: WireOutput>(&self, dest: &mut O) -> Result<(), WireCodecError> {
        dest.push_byte(UNL_MODIFY_TX_TAG);
        self.op.encode_to(dest)?;
        self.seq.encode_to(dest)?;
        self.validator.encode_to(dest)?;
        self.envelope.encode_to(dest)?;
        Ok(())
    }
}

impl WireDecode for UnlModify {
    fn decode<I: WireInput>(input: &mut I) -> Result<Self, WireCodecError> {
        let tag = input.read_byte()?;
        if tag != UNL_MODIFY_TX_TAG {
            return Err(WireCodecError::InputError(format!(
                "Unknown transaction type tag {tag}"
            )));
        }
        Ok(Self {
            op: UnlModifyOp::decode(input)?,
            seq: LedgerSeq::decode(input)?,
            validator: ValidatorKey::decode(input)?,
            envelope: TxEnvelope::decode(input)?,
        })
    }
}
