use thiserror::Error;

/// Why a modification was rejected before touching ledger state.
///
/// A modification is a protocol-injected pseudo-transaction without a
/// payer; any payer-style field disqualifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreflightReason {
    #[error("source account must be zero")]
    SourceAccountSet,
    #[error("fee must be zero")]
    FeeSet,
    #[error("signing key and signature must be empty")]
    SignaturePresent,
    #[error("sequence must be zero and no prior transaction referenced")]
    SequenceSet,
}

/// Why a modification failed against the ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("not a flag ledger")]
    NotFlagLedger,
    #[error("transaction sequence does not match the enclosing ledger")]
    SequenceMismatch,
    #[error("pending slot already occupied")]
    SlotOccupied,
    #[error("conflicts with the other pending slot")]
    ConflictingPending,
    #[error("validator is already listed")]
    AlreadyListed,
    #[error("validator is not listed")]
    NotListed,
}

/// The result of applying one transaction to an open view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Applied and committed into the view.
    Success,
    /// Rejected before state was consulted.
    Preflight(PreflightReason),
    /// Rejected against state; retrying can never succeed.
    Permanent(RejectReason),
    /// Rejected against state; a later ledger may accept it. No Negative
    /// UNL rule produces this, but other pseudo-transaction appliers do.
    Transient(RejectReason),
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
