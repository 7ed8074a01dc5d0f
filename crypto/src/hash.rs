use blake2::{
    digest::consts::{U20, U32},
    Blake2b, Digest,
};
use fl_common::{Hash32, NodeId, ValidatorKey};

pub type Blake2b256 = Blake2b<U32>;
pub type Blake2b160 = Blake2b<U20>;

/// Trait for different types of hasher
pub trait Hasher {
    fn hash(value: &[u8]) -> Hash32;
}

impl Hasher for Blake2b256 {
    fn hash(value: &[u8]) -> Hash32 {
        let mut hasher = Self::new();
        hasher.update(value);
        hasher.finalize().into()
    }
}

/// Generic hash function
pub fn hash<H: Hasher>(value: &[u8]) -> Hash32 {
    H::hash(value)
}

/// The 256-bit content hash used for ledger and transaction identities.
pub fn content_hash(value: &[u8]) -> Hash32 {
    Blake2b256::hash(value)
}

/// The 160-bit fingerprint of a validator's master public key.
///
/// Voting computes over fingerprints rather than the keys themselves; the
/// fingerprint width also matches the tie-break pad taken from a ledger
/// hash.
pub fn node_id(key: &ValidatorKey) -> NodeId {
    let mut hasher = Blake2b160::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}
