use crate::{HASH_SIZE, NODE_ID_SIZE};
use fl_codec::impl_wire_codec_for_newtype;
use std::fmt::{Display, Formatter};

// Type aliases
pub type Hash32 = [u8; HASH_SIZE];
pub type Octets = Vec<u8>;
pub type LedgerSeq = u32;
pub type NodeId = [u8; NODE_ID_SIZE];
pub type AccountId = [u8; 20];

// Default values
pub const HASH32_EMPTY: Hash32 = [0u8; HASH_SIZE];
pub const ACCOUNT_ID_EMPTY: AccountId = [0u8; 20];

/// A validator's master public key, as distributed in the trusted list.
///
/// The length varies with the key algorithm but is fixed per validator.
/// Ordering is lexicographic on the raw octets, which makes sets of keys
/// serialize canonically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorKey(pub Octets);
impl_wire_codec_for_newtype!(ValidatorKey, Octets);

impl ValidatorKey {
    pub fn new(octets: Octets) -> Self {
        Self(octets)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for ValidatorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
