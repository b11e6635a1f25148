pub mod definition;
pub mod translation;

pub use definition::*;
pub use translation::*;
