pub mod candidates;
pub mod score;
pub mod tracker;
pub mod voter;

pub use candidates::*;
pub use score::*;
pub use tracker::*;
pub use voter::*;
