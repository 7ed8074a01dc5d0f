mod negative_unl;

pub use negative_unl::*;
