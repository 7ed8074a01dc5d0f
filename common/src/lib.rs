pub mod chain_spec;
pub mod constants;
pub mod types;

pub use chain_spec::*;
pub use constants::*;
pub use types::*;
