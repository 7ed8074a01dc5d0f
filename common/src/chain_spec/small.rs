/// `F`: The number of ledgers in one measurement window. Every ledger whose
/// sequence is a non-zero multiple of `F` is a flag ledger.
pub const FLAG_LEDGER_PERIOD: u32 = 64;
