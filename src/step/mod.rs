pub mod kind;
pub mod location;

pub use kind::*;
pub use location::*;
