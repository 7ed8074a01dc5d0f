pub mod ancestors;
pub mod ledger;
pub mod store;
pub mod validations;

pub use ancestors::*;
pub use ledger::*;
pub use store::*;
pub use validations::*;
